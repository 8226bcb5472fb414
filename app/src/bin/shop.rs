use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::*;
use serde::Deserialize;
use structopt::StructOpt;
use tokio::io::{AsyncBufReadExt, BufReader};

use infra::ids::Id;
use storefront::cart::CartState;
use storefront::checkout::{PaymentMethod, Totals};
use storefront::config::{self, EnvLogger};
use storefront::menu::{
    Bestsellers, CatalogItem, CategoryFilter, DietFilter, QueryParameters, RelatedProducts,
    ShowCategories, ShowMenu, ShowProduct, SortKey,
};
use storefront::services::Queryable;
use storefront::Storefront;

#[derive(Debug, StructOpt)]
#[structopt(name = "shop", about = "Browse the menu and fill a cart.")]
struct Opt {
    /// TOML config file; without one, checkout settings come from STOREFRONT_* variables
    #[structopt(short = "c", long = "config", parse(from_os_str))]
    config: Option<PathBuf>,
    #[structopt(subcommand)]
    command: Commands,
}

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(name = "menu", about = "Search, filter and sort the menu")]
    Menu(MenuOpts),
    #[structopt(name = "show", about = "Show one item and related items")]
    Show { id: Id<CatalogItem> },
    #[structopt(name = "categories", about = "List categories")]
    Categories,
    #[structopt(name = "bestsellers", about = "List bestsellers")]
    Bestsellers,
    #[structopt(name = "session", about = "Interactive shopping session on stdin")]
    Session,
}

#[derive(Debug, StructOpt)]
struct MenuOpts {
    #[structopt(short = "s", long = "search", default_value = "")]
    search: String,
    #[structopt(long = "category", default_value = "all")]
    category: CategoryFilter,
    #[structopt(long = "diet", default_value = "all")]
    diet: DietFilter,
    #[structopt(long = "sort", default_value = "popular")]
    sort: SortKey,
    /// Print the listing as JSON
    #[structopt(long = "json")]
    json: bool,
}

#[derive(Deserialize, Debug)]
struct Config {
    #[serde(flatten)]
    storefront: config::Config,
    #[serde(default)]
    env_logger: EnvLogger,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let opt = Opt::from_args();

    let config = match opt.config.as_ref() {
        Some(path) => config::load_toml::<Config>(path)?,
        None => Config {
            storefront: config::Config::from_env()?,
            env_logger: EnvLogger::default(),
        },
    };
    config.env_logger.builder().init();
    debug!("Options: {:?}", opt);

    let front = Storefront::new(&config.storefront).context("open storefront")?;

    match opt.command {
        Commands::Menu(menu) => {
            let params = QueryParameters {
                search: menu.search,
                category: menu.category,
                diet: menu.diet,
                sort: menu.sort,
            };
            let listing = front.menu().query(ShowMenu(params));
            if menu.json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else if listing.items.is_empty() {
                println!("No dishes found.");
            } else {
                for item in listing.items.iter() {
                    print_item(item);
                }
            }
        }
        Commands::Show { id } => match front.menu().query(ShowProduct(id.clone())) {
            Some(item) => {
                print_detail(&item);
                let related = front.menu().query(RelatedProducts(id));
                if !related.is_empty() {
                    println!("\nYou might also like:");
                    for item in related.iter() {
                        print_item(item);
                    }
                }
            }
            None => bail!("Product not found: {}", id),
        },
        Commands::Categories => {
            for cat in front.menu().query(ShowCategories) {
                println!("{} {:<10} {}", cat.icon, cat.id, cat.description);
            }
        }
        Commands::Bestsellers => {
            for item in front.menu().query(Bestsellers) {
                print_item(&item);
            }
        }
        Commands::Session => session(&front).await?,
    }

    Ok(())
}

#[derive(Debug)]
enum Action {
    Add(Id<CatalogItem>, u32),
    Inc(Id<CatalogItem>),
    Dec(Id<CatalogItem>),
    Set(Id<CatalogItem>, i64),
    Remove(Id<CatalogItem>),
    Clear,
    Cart,
    Open,
    Close,
    Wish(Id<CatalogItem>),
    Wishlist,
    Checkout(PaymentMethod),
    Quit,
}

impl std::str::FromStr for Action {
    type Err = anyhow::Error;
    fn from_str(line: &str) -> Result<Self> {
        let words = line.split_whitespace().collect::<Vec<_>>();
        let id = |n: usize| -> Result<Id<CatalogItem>> {
            let raw = words.get(n).context("missing item id")?;
            Ok(raw.parse()?)
        };
        let action = match words.first().copied() {
            Some("add") => {
                let qty = match words.get(2) {
                    Some(q) => q.parse::<u32>().context("quantity")?,
                    None => 1,
                };
                if qty == 0 {
                    bail!("Quantity must be at least 1");
                }
                Action::Add(id(1)?, qty)
            }
            Some("inc") => Action::Inc(id(1)?),
            Some("dec") => Action::Dec(id(1)?),
            Some("set") => {
                let qty = words.get(2).context("missing quantity")?;
                Action::Set(id(1)?, qty.parse::<i64>().context("quantity")?)
            }
            Some("remove") => Action::Remove(id(1)?),
            Some("clear") => Action::Clear,
            Some("cart") => Action::Cart,
            Some("open") => Action::Open,
            Some("close") => Action::Close,
            Some("wish") => Action::Wish(id(1)?),
            Some("wishlist") => Action::Wishlist,
            Some("checkout") => match words.get(1) {
                Some(m) => Action::Checkout(m.parse()?),
                None => Action::Checkout(PaymentMethod::default()),
            },
            Some("quit") | Some("exit") => Action::Quit,
            Some(other) => bail!("Unknown command: {}", other),
            None => bail!("Empty command"),
        };
        Ok(action)
    }
}

async fn session(front: &Storefront) -> Result<()> {
    let mut badge = front.cart().subscribe();
    let badge_task = tokio::spawn(async move {
        while let Some(snap) = badge.changed().await {
            eprintln!(
                "  [cart {}] {} items, {}",
                snap.revision(),
                snap.total_item_count(),
                snap.subtotal()
            );
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                println!("? {}", e);
                continue;
            }
        };
        trace!("Action: {:?}", action);
        let cart = front.cart();
        match action {
            Action::Add(id, qty) => match front.add_to_cart(&id, qty) {
                Some(notice) => println!("{}", notice),
                None => println!("Product not found: {}", id),
            },
            Action::Inc(id) => cart.increment(&id),
            Action::Dec(id) => cart.decrement(&id),
            Action::Set(id, qty) => cart.update_quantity(&id, qty),
            Action::Remove(id) => cart.remove_item(&id),
            Action::Clear => cart.clear(),
            Action::Cart => print_cart(&cart.snapshot()),
            Action::Open => {
                cart.set_panel_open(true);
                print_cart(&cart.snapshot());
            }
            Action::Close => cart.set_panel_open(false),
            Action::Wish(id) => match front.toggle_wishlist(&id) {
                Some(notice) => println!("{}", notice),
                None => println!("Product not found: {}", id),
            },
            Action::Wishlist => {
                let items = front.wishlist_items();
                if items.is_empty() {
                    println!("Your wishlist is empty.");
                }
                for item in items.iter() {
                    print_item(item);
                }
            }
            Action::Checkout(method) => {
                let pending = match front.checkout().begin(method) {
                    Ok(pending) => pending,
                    Err(e) => {
                        println!("{}", e.notice());
                        continue;
                    }
                };
                println!("Processing order...");
                match pending.complete().await {
                    Ok(done) => {
                        println!("{}", done.notice);
                        println!("Order {} total {}", done.order_id, done.totals.total);
                    }
                    Err(e) => println!("{}", e.notice()),
                }
            }
            Action::Quit => break,
        }
    }

    badge_task.abort();
    Ok(())
}

fn print_item(item: &CatalogItem) {
    let mut tags = Vec::new();
    if item.is_veg {
        tags.push("veg");
    }
    if item.is_hot {
        tags.push("spicy");
    }
    if item.is_bestseller {
        tags.push("bestseller");
    }
    println!(
        "{:<10} {:<24} {:>6}  ★{:.1} ({}) {}",
        item.id,
        item.name,
        item.price,
        item.rating,
        item.review_count,
        tags.join(",")
    );
}

fn print_detail(item: &CatalogItem) {
    print_item(item);
    println!("  {}", item.description);
    if let Some(ingredients) = item.ingredients.as_ref() {
        println!("  Ingredients: {}", ingredients.join(", "));
    }
    if let Some(calories) = item.calories {
        println!("  Calories: {}", calories);
    }
    if let Some(prep) = item.prep_time.as_ref() {
        println!("  Prep time: {}", prep);
    }
}

fn print_cart(cart: &CartState) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in cart.lines() {
        println!(
            "{:<10} {:<24} {:>3} x {:>6} = {:>7}",
            line.item_id,
            line.name,
            line.quantity,
            line.price,
            line.line_total()
        );
    }
    let totals = Totals::of(cart);
    println!("Subtotal {:>7}", totals.subtotal);
    println!("Delivery {:>7}", totals.delivery_fee);
    println!("Total    {:>7}", totals.total);
}
