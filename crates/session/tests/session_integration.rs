//! End-to-end session flows against the in-memory gateway.

use client::{ApiError, InMemoryOrderGateway, OrderGateway};
use common::{Money, ProductId};
use domain::{CatalogProduct, PersistedLine, UNKNOWN_PRODUCT_NAME};
use session::{CatalogCache, OrderComposer, OrderListModel};

fn desk_gateway() -> InMemoryOrderGateway {
    InMemoryOrderGateway::with_products(vec![
        CatalogProduct::new(1, "Keyboard", Money::from_cents(4500), 10),
        CatalogProduct::new(2, "Mouse", Money::from_cents(1900), 4),
        CatalogProduct::new(3, "Monitor", Money::from_cents(15000), 2),
    ])
}

async fn loaded_cache(gateway: &InMemoryOrderGateway) -> CatalogCache {
    let mut cache = CatalogCache::default();
    cache.load(gateway).await.unwrap();
    cache
}

mod composing {
    use super::*;

    #[tokio::test]
    async fn compose_and_submit_a_new_order() {
        let gateway = desk_gateway();
        let cache = loaded_cache(&gateway).await;

        let mut composer = OrderComposer::new_order();
        composer.open_add_form();
        composer.select_product(ProductId::new(1));
        composer.set_quantity(2);
        composer.confirm_form(cache.catalog()).unwrap();

        composer.open_add_form();
        composer.select_product(ProductId::new(2));
        composer.set_quantity(1);
        composer.confirm_form(cache.catalog()).unwrap();

        assert_eq!(composer.draft().total_quantity(), 3);
        assert_eq!(composer.draft().total_price(), Money::from_cents(10900));

        let persisted = composer.save(&gateway).await.unwrap();
        assert!(persisted.order_number.is_some());

        let mut list = OrderListModel::default();
        list.refresh(&gateway).await.unwrap();
        assert_eq!(list.orders().len(), 1);
        assert_eq!(list.orders()[0].id, persisted.id);
        assert_eq!(list.orders()[0].total_quantity, 3);
        assert_eq!(list.orders()[0].total_price, Money::from_cents(10900));
    }

    #[tokio::test]
    async fn adding_the_same_product_twice_accumulates() {
        let gateway = desk_gateway();
        let cache = loaded_cache(&gateway).await;
        let mut composer = OrderComposer::new_order();

        for quantity in [2, 1] {
            composer.open_add_form();
            composer.select_product(ProductId::new(1));
            composer.set_quantity(quantity);
            composer.confirm_form(cache.catalog()).unwrap();
        }

        assert_eq!(composer.draft().line_count(), 1);
        assert_eq!(composer.draft().total_quantity(), 3);
    }

    #[tokio::test]
    async fn line_views_join_catalog_names() {
        let gateway = desk_gateway();
        let cache = loaded_cache(&gateway).await;
        let mut composer = OrderComposer::new_order();
        composer.open_add_form();
        composer.select_product(ProductId::new(3));
        composer.set_quantity(2);
        composer.confirm_form(cache.catalog()).unwrap();

        let views = composer.draft().line_views(cache.catalog());

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].product_name, "Monitor");
        assert_eq!(views[0].line_total, Money::from_cents(30000));
    }
}

mod editing {
    use super::*;

    #[tokio::test]
    async fn reopen_edit_and_save_replaces_the_stored_lines() {
        let gateway = desk_gateway();
        let cache = loaded_cache(&gateway).await;
        let id = gateway.seed_order(vec![
            PersistedLine {
                product_id: ProductId::new(1),
                quantity: 2,
            },
            PersistedLine {
                product_id: ProductId::new(2),
                quantity: 1,
            },
        ]);

        let mut composer = OrderComposer::open(&gateway, id, cache.catalog())
            .await
            .unwrap();
        assert_eq!(composer.draft().id(), Some(id));
        assert_eq!(composer.draft().total_quantity(), 3);

        composer.open_edit_form(ProductId::new(1));
        composer.set_quantity(5);
        composer.confirm_form(cache.catalog()).unwrap();

        composer.remove_line(ProductId::new(2));

        composer.open_add_form();
        composer.select_product(ProductId::new(3));
        composer.set_quantity(1);
        composer.confirm_form(cache.catalog()).unwrap();

        let persisted = composer.save(&gateway).await.unwrap();
        assert_eq!(persisted.id, id);

        let fetched = gateway.get_order(id).await.unwrap();
        let lines: Vec<(i64, u32)> = fetched
            .lines
            .iter()
            .map(|line| (line.product_id.as_i64(), line.quantity))
            .collect();
        assert_eq!(lines, vec![(1, 5), (3, 1)]);
    }

    #[tokio::test]
    async fn discontinued_product_lines_survive_and_can_be_removed() {
        let gateway = desk_gateway();
        let cache = loaded_cache(&gateway).await;
        let id = gateway.seed_order(vec![
            PersistedLine {
                product_id: ProductId::new(1),
                quantity: 1,
            },
            PersistedLine {
                product_id: ProductId::new(99),
                quantity: 3,
            },
        ]);

        let mut composer = OrderComposer::open(&gateway, id, cache.catalog())
            .await
            .unwrap();

        let views = composer.draft().line_views(cache.catalog());
        assert_eq!(views[1].product_name, UNKNOWN_PRODUCT_NAME);
        assert_eq!(views[1].unit_price, Money::zero());

        // Quantity stays editable even without a stock figure.
        assert!(composer.open_edit_form(ProductId::new(99)));
        composer.set_quantity(7);
        composer.confirm_form(cache.catalog()).unwrap();
        assert_eq!(composer.draft().total_quantity(), 8);

        composer.remove_line(ProductId::new(99));
        composer.save(&gateway).await.unwrap();

        let fetched = gateway.get_order(id).await.unwrap();
        assert_eq!(fetched.lines.len(), 1);
        assert_eq!(fetched.lines[0].product_id, ProductId::new(1));
    }
}

mod deleting {
    use super::*;

    #[tokio::test]
    async fn confirmed_delete_shrinks_the_list() {
        let gateway = desk_gateway();
        let first = gateway.seed_order(vec![PersistedLine {
            product_id: ProductId::new(1),
            quantity: 1,
        }]);
        let second = gateway.seed_order(vec![PersistedLine {
            product_id: ProductId::new(2),
            quantity: 2,
        }]);

        let mut list = OrderListModel::default();
        list.refresh(&gateway).await.unwrap();
        assert_eq!(list.orders().len(), 2);

        list.request_delete(first);
        let deleted = list.confirm_delete(&gateway).await.unwrap();
        assert_eq!(deleted, Some(first));

        list.refresh(&gateway).await.unwrap();
        assert_eq!(list.orders().len(), 1);
        assert_eq!(list.orders()[0].id, second);
    }

    #[tokio::test]
    async fn cancelled_delete_touches_nothing() {
        let gateway = desk_gateway();
        let id = gateway.seed_order(vec![]);
        let mut list = OrderListModel::default();
        list.refresh(&gateway).await.unwrap();

        list.request_delete(id);
        list.cancel_delete();

        assert_eq!(list.pending_delete(), None);
        assert!(gateway.contains_order(id));
        assert_eq!(list.confirm_delete(&gateway).await.unwrap(), None);
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn catalog_outage_leaves_an_empty_catalog() {
        let gateway = desk_gateway();
        gateway.set_fail_on_products(true);

        let mut cache = CatalogCache::default();
        let result = cache.load(&gateway).await;

        assert!(matches!(result, Err(ApiError::CatalogUnavailable(_))));
        assert!(cache.state().is_failed());
        assert!(cache.catalog().is_empty());
        assert!(cache.find(ProductId::new(1)).is_none());
    }

    #[tokio::test]
    async fn failed_submit_keeps_the_draft_for_retry() {
        let gateway = desk_gateway();
        let cache = loaded_cache(&gateway).await;
        let mut composer = OrderComposer::new_order();
        composer.open_add_form();
        composer.select_product(ProductId::new(1));
        composer.set_quantity(2);
        composer.confirm_form(cache.catalog()).unwrap();

        gateway.set_fail_on_submit(true);
        assert!(composer.save(&gateway).await.is_err());
        assert_eq!(gateway.order_count(), 0);
        assert_eq!(composer.draft().total_quantity(), 2);

        gateway.set_fail_on_submit(false);
        composer.save(&gateway).await.unwrap();
        assert_eq!(gateway.order_count(), 1);
    }

    #[tokio::test]
    async fn failed_delete_can_be_retried_or_cancelled() {
        let gateway = desk_gateway();
        let id = gateway.seed_order(vec![]);
        let mut list = OrderListModel::default();
        list.refresh(&gateway).await.unwrap();
        list.request_delete(id);

        gateway.set_fail_on_delete(true);
        assert!(list.confirm_delete(&gateway).await.is_err());
        assert_eq!(list.pending_delete(), Some(id));

        gateway.set_fail_on_delete(false);
        let deleted = list.confirm_delete(&gateway).await.unwrap();
        assert_eq!(deleted, Some(id));
        assert!(!gateway.contains_order(id));
    }
}
