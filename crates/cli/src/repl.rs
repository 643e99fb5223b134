//! Command loop wiring the session layer to the terminal.
//!
//! The thinnest possible frontend: one command per line, errors printed
//! inline, the loop always continues. State lives in the session layer.

use std::io::Write as _;

use client::OrderGateway;
use common::OrderId;
use domain::DraftOrder;
use session::{CatalogCache, OrderComposer, OrderListModel};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;

/// Runs the command loop until `quit` or EOF.
pub async fn run<G: OrderGateway>(gateway: &G) -> std::io::Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut cache = CatalogCache::default();
    let mut list = OrderListModel::default();

    if let Err(err) = cache.load(gateway).await {
        println!("{err}");
    }

    println!("order desk (type `help` for commands)");
    loop {
        let Some(line) = prompt(&mut input, "> ").await? else {
            break;
        };
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "list" => show_list(gateway, &mut list).await,
            "show" => match parse_id(parts.next()) {
                Some(id) => show_order(gateway, &cache, id).await,
                None => println!("usage: show <order-id>"),
            },
            "new" => {
                if let Err(err) = cache.load(gateway).await {
                    println!("{err}");
                }
                compose(gateway, &mut input, &cache, OrderComposer::new_order()).await?;
            }
            "edit" => match parse_id(parts.next()) {
                Some(id) => {
                    if let Err(err) = cache.load(gateway).await {
                        println!("{err}");
                    }
                    match OrderComposer::open(gateway, id, cache.catalog()).await {
                        Ok(composer) => compose(gateway, &mut input, &cache, composer).await?,
                        Err(err) => println!("{err}"),
                    }
                }
                None => println!("usage: edit <order-id>"),
            },
            "delete" => match parse_id(parts.next()) {
                Some(id) => delete_order(gateway, &mut input, &mut list, id).await?,
                None => println!("usage: delete <order-id>"),
            },
            "products" => show_products(gateway, &mut cache).await,
            "help" => help(),
            "quit" | "exit" => break,
            other => println!("unknown command: {other} (type `help`)"),
        }
    }
    Ok(())
}

/// Composition sub-loop for one draft order. Returns on `save`,
/// `cancel`, or EOF.
async fn compose<G: OrderGateway>(
    gateway: &G,
    input: &mut Input,
    cache: &CatalogCache,
    mut composer: OrderComposer,
) -> std::io::Result<()> {
    print_draft(composer.draft(), cache);
    loop {
        let Some(line) = prompt(input, "order> ").await? else {
            return Ok(());
        };
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "add" => {
                let (Some(product_id), Some(quantity)) =
                    (parse_id(parts.next()), parse_quantity(parts.next()))
                else {
                    println!("usage: add <product-id> <quantity>");
                    continue;
                };
                composer.open_add_form();
                composer.select_product(product_id);
                composer.set_quantity(quantity);
                match composer.confirm_form(cache.catalog()) {
                    Ok(()) => print_totals(&composer),
                    Err(err) => {
                        println!("{err}");
                        composer.cancel_form();
                    }
                }
            }
            "qty" => {
                let (Some(product_id), Some(quantity)) =
                    (parse_id(parts.next()), parse_quantity(parts.next()))
                else {
                    println!("usage: qty <product-id> <quantity>");
                    continue;
                };
                if !composer.open_edit_form(product_id) {
                    println!("product {product_id} has no line item");
                    continue;
                }
                composer.set_quantity(quantity);
                match composer.confirm_form(cache.catalog()) {
                    Ok(()) => print_totals(&composer),
                    Err(err) => {
                        println!("{err}");
                        composer.cancel_form();
                    }
                }
            }
            "rm" => match parse_id(parts.next()) {
                Some(product_id) => {
                    composer.remove_line(product_id);
                    print_totals(&composer);
                }
                None => println!("usage: rm <product-id>"),
            },
            "items" => print_draft(composer.draft(), cache),
            "save" => match composer.save(gateway).await {
                Ok(persisted) => {
                    match &persisted.order_number {
                        Some(number) => println!("saved order {number}"),
                        None => println!("saved order id {}", persisted.id),
                    }
                    return Ok(());
                }
                Err(err) => println!("{err}"),
            },
            "cancel" => {
                println!("discarded");
                return Ok(());
            }
            "help" => compose_help(),
            other => println!("unknown command: {other} (type `help`)"),
        }
    }
}

async fn show_list<G: OrderGateway>(gateway: &G, list: &mut OrderListModel) {
    if let Err(err) = list.refresh(gateway).await {
        println!("{err}");
        return;
    }
    if list.orders().is_empty() {
        println!("no orders");
        return;
    }
    println!(
        "{:>6}  {:<10}  {:<12}  {:>6}  {:>12}",
        "id", "number", "created", "items", "total"
    );
    for order in list.orders() {
        let created = order
            .created_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>6}  {:<10}  {:<12}  {:>6}  {:>12}",
            order.id.to_string(),
            order.order_number,
            created,
            order.total_quantity,
            order.total_price.to_string(),
        );
    }
}

async fn show_order<G: OrderGateway>(gateway: &G, cache: &CatalogCache, id: OrderId) {
    match gateway.get_order(id).await {
        Ok(persisted) => {
            let draft = DraftOrder::from_persisted(&persisted, cache.catalog());
            print_draft(&draft, cache);
        }
        Err(err) => println!("{err}"),
    }
}

async fn show_products<G: OrderGateway>(gateway: &G, cache: &mut CatalogCache) {
    if let Err(err) = cache.load(gateway).await {
        println!("{err}");
        return;
    }
    if cache.catalog().is_empty() {
        println!("no products");
        return;
    }
    for product in cache.catalog().products() {
        println!(
            "{:>6}  {:<24}  {:>10}  stock {}",
            product.id.to_string(),
            product.name,
            product.unit_price.to_string(),
            product.available_stock,
        );
    }
}

async fn delete_order<G: OrderGateway>(
    gateway: &G,
    input: &mut Input,
    list: &mut OrderListModel,
    id: OrderId,
) -> std::io::Result<()> {
    list.request_delete(id);
    let answer = prompt(input, &format!("delete order {id}? [y/N] ")).await?;
    let confirmed = answer
        .as_deref()
        .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y"));
    if !confirmed {
        list.cancel_delete();
        println!("kept order {id}");
        return Ok(());
    }

    match list.confirm_delete(gateway).await {
        Ok(_) => {
            println!("deleted order {id}");
            show_list(gateway, list).await;
        }
        Err(err) => {
            println!("{err}");
            list.cancel_delete();
        }
    }
    Ok(())
}

fn print_draft(draft: &DraftOrder, cache: &CatalogCache) {
    match (draft.id(), draft.order_number()) {
        (Some(id), Some(number)) => println!("order {number} (id {id})"),
        (Some(id), None) => println!("order id {id}"),
        _ => println!("new order"),
    }
    for view in draft.line_views(cache.catalog()) {
        println!(
            "  {:>6}  {:<24}  x{:<4}  {:>10}  {:>10}",
            view.product_id.to_string(),
            view.product_name,
            view.quantity,
            view.unit_price.to_string(),
            view.line_total.to_string(),
        );
    }
    println!(
        "  {} items, total {}",
        draft.total_quantity(),
        draft.total_price()
    );
}

fn print_totals(composer: &OrderComposer) {
    println!(
        "  {} items, total {}",
        composer.draft().total_quantity(),
        composer.draft().total_price()
    );
}

async fn prompt(input: &mut Input, text: &str) -> std::io::Result<Option<String>> {
    print!("{text}");
    std::io::stdout().flush()?;
    input.next_line().await
}

fn parse_id<T: From<i64>>(arg: Option<&str>) -> Option<T> {
    arg?.parse::<i64>().ok().map(T::from)
}

fn parse_quantity(arg: Option<&str>) -> Option<u32> {
    arg?.parse().ok()
}

fn help() {
    println!("commands:");
    println!("  list               refresh and print the order list");
    println!("  show <order-id>    print one order's lines");
    println!("  new                compose a new order");
    println!("  edit <order-id>    edit an existing order");
    println!("  delete <order-id>  delete an order, after confirmation");
    println!("  products           refresh and print the product catalog");
    println!("  quit               exit");
}

fn compose_help() {
    println!("composition commands:");
    println!("  add <product-id> <quantity>  add a product (quantities accumulate)");
    println!("  qty <product-id> <quantity>  replace a line's quantity");
    println!("  rm <product-id>              remove a line");
    println!("  items                        print the draft");
    println!("  save                         submit, then leave the loop");
    println!("  cancel                       leave without saving");
}
