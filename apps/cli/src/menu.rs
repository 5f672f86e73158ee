//! # Menu Loop
//!
//! The blocking, line-oriented console interface.
//!
//! ## Menu Tree
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Main Menu                                                          │
//! │  ├── 1. Register ──► username / password / (role unless first)      │
//! │  ├── 2. Login ─────► Admin Menu        or        User Menu          │
//! │  │                   ├── 1. Add Stock            ├── 1. View Inv.   │
//! │  │                   ├── 2. View Inventory       ├── 2. Add to Cart │
//! │  │                   └── 3. Logout               ├── 3. Checkout    │
//! │  │                                               └── 4. Logout      │
//! │  └── 3. Exit                                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Policy
//! Every domain error (duplicate username, permission denied, empty
//! cart, ...) is printed and the enclosing menu continues. Nothing in
//! this module aborts the process except a closed stdin.

use tracing::debug;

use shopkeep_core::{Product, Receipt, Role, StockView};

use crate::context::AppContext;
use crate::error::CliResult;
use crate::prompt::{read_discount, read_line, read_money, read_parse};

/// Runs the top-level menu until the user picks Exit.
pub fn run(ctx: &mut AppContext) -> CliResult<()> {
    loop {
        println!("\nMain Menu:");
        println!("1. Register");
        println!("2. Login");
        println!("3. Exit");

        match read_line("Choose an action: ")?.as_str() {
            "1" => register(ctx)?,
            "2" => login(ctx)?,
            "3" => {
                println!("Exiting system.");
                return Ok(());
            }
            other => println!("Invalid choice '{}'. Please try again.", other),
        }
    }
}

// =============================================================================
// Registration & Login
// =============================================================================

fn register(ctx: &mut AppContext) -> CliResult<()> {
    let username = read_line("Enter username: ")?;
    let password = read_line("Enter password: ")?;

    // The very first account is forced to admin by the store; only ask
    // for a role when the choice actually matters.
    let role_choice = if ctx.accounts.is_empty() {
        None
    } else {
        Some(prompt_role()?)
    };

    match ctx.accounts.register(&username, &password, role_choice) {
        Ok(account) => {
            if ctx.accounts.len() == 1 {
                println!("First account registered as ADMIN.");
            }
            println!(
                "User '{}' registered successfully as {}.",
                account.username, account.role
            );
        }
        Err(err) => println!("{}", err),
    }
    Ok(())
}

/// Asks until the answer parses as a role.
fn prompt_role() -> CliResult<Role> {
    loop {
        let line = read_line("Register as 'user' or 'admin': ")?;
        match line.parse::<Role>() {
            Ok(role) => return Ok(role),
            Err(err) => println!("{}", err),
        }
    }
}

fn login(ctx: &mut AppContext) -> CliResult<()> {
    let username = read_line("Enter your username: ")?;
    let password = read_line("Enter your password: ")?;

    let account = match ctx.accounts.authenticate(&username, &password) {
        Some(account) => account,
        None => {
            // InvalidCredentials is a message, not an error type
            println!("Invalid username or password.");
            return Ok(());
        }
    };

    println!("Login successful! You are logged in as {}.", account.role);
    ctx.session.login(account.clone());

    match account.role {
        Role::Admin => admin_menu(ctx)?,
        Role::User => user_menu(ctx)?,
    }
    Ok(())
}

fn logout(ctx: &mut AppContext) {
    // The cart is deliberately NOT cleared here: lines survive logout
    // within one process run (they die with the process).
    if let Some(account) = ctx.session.logout() {
        println!("Goodbye, {}", account.username);
    }
}

// =============================================================================
// Admin Menu
// =============================================================================

fn admin_menu(ctx: &mut AppContext) -> CliResult<()> {
    loop {
        println!("\nAdmin Menu:");
        println!("1. Add Stock");
        println!("2. View Inventory");
        println!("3. Logout");

        match read_line("Choose an action: ")?.as_str() {
            "1" => add_stock(ctx)?,
            "2" => view_inventory(ctx),
            "3" => {
                logout(ctx);
                return Ok(());
            }
            other => println!("Invalid choice '{}'.", other),
        }
    }
}

fn add_stock(ctx: &mut AppContext) -> CliResult<()> {
    let requester = match ctx.session.current() {
        Some(account) => account.clone(),
        None => return Ok(()), // unreachable from the menu; belt and braces
    };

    let name = read_line("Enter product name: ")?;
    let product_id: u32 = read_parse("Enter product ID: ")?;
    let price = read_money("Enter product price: ")?;
    let discount = read_discount("Enter product discount (0 if none): ")?;
    let quantity: i64 = read_parse("Enter quantity to add: ")?;

    let product = Product {
        product_id,
        name: name.clone(),
        price,
        discount,
    };

    debug!(product_id, quantity, "Admin add stock request");
    match ctx.inventory.add_stock(product, quantity, &requester) {
        Ok(()) => println!(
            "Added {} of {} to inventory with a discount of {}%.",
            quantity,
            name,
            discount.percentage()
        ),
        Err(err) => println!("{}", err),
    }
    Ok(())
}

// =============================================================================
// User Menu
// =============================================================================

fn user_menu(ctx: &mut AppContext) -> CliResult<()> {
    loop {
        println!("\nUser Menu:");
        println!("1. View Inventory");
        println!("2. Add to Cart");
        println!("3. Checkout");
        println!("4. Logout");

        match read_line("Choose an action: ")?.as_str() {
            "1" => view_inventory(ctx),
            "2" => add_to_cart(ctx)?,
            "3" => checkout(ctx),
            "4" => {
                logout(ctx);
                return Ok(());
            }
            other => println!("Invalid choice '{}'.", other),
        }
    }
}

fn add_to_cart(ctx: &mut AppContext) -> CliResult<()> {
    let product_id: u32 = read_parse("Enter product ID to add to cart: ")?;
    let quantity: i64 = read_parse("Enter quantity: ")?;

    // Availability is NOT checked here - only at checkout.
    let product = match ctx.inventory.lookup(product_id) {
        Some(entry) => entry.product.clone(),
        None => {
            println!("Product not available.");
            return Ok(());
        }
    };

    match ctx.cart.add_line(product.clone(), quantity) {
        Ok(()) => println!("Added {} of {} to cart.", quantity, product.name),
        Err(err) => println!("{}", err),
    }
    Ok(())
}

fn checkout(ctx: &mut AppContext) {
    match ctx.inventory.checkout(&mut ctx.cart) {
        Ok(receipt) => print_receipt(&receipt),
        Err(err) => println!("{}", err),
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn view_inventory(ctx: &AppContext) {
    println!("\nCurrent Inventory:");
    let rows = ctx.inventory.list();
    if rows.is_empty() {
        println!("(no products in stock)");
        return;
    }
    for row in rows {
        print_stock_row(&row);
    }
}

fn print_stock_row(row: &StockView) {
    println!(
        "Product ID: {}, Name: {}, Price: {}, Discount: {}%, Final Price: {}, Quantity: {}",
        row.product_id,
        row.name,
        row.price,
        row.discount.percentage(),
        row.discounted_unit_price,
        row.quantity
    );
}

fn print_receipt(receipt: &Receipt) {
    for line in &receipt.lines {
        println!(
            "{} x {} @ {} = {}",
            line.quantity,
            line.product.name,
            line.product.price,
            line.line_total()
        );
    }
    println!("Total bill: {}", receipt.total);
    println!("Payment successful!");
    println!("ORDER PLACED SUCCESSFULLY.");
}
