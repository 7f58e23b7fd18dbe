//! Courier: headless delivery-rider client.
//!
//! Drives the sign-in, order-feed, and delivery-map screens from the
//! command line against the Courier backend and the external
//! directions service.

mod config;
mod screens;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use courier_core::api::{ApiClient, RiderBackend};
use courier_core::geo::StoredLocation;
use courier_core::poll::StatusSignal;
use courier_core::routing::{MapboxDirections, RouteProvider};
use courier_core::session::{self, SignUpForm};
use courier_core::store::{ClientState, FileStore, MemoryStore, StateStore};
use courier_model::{Coordinate, OrderSummary, Session, TransportType};

use config::Config;
use screens::{
    DeliveryScreen, FormOutcome, Navigation, OrdersScreen, submit_sign_in, submit_sign_up,
};

#[derive(Parser)]
#[command(name = "courier", version, about = "Delivery rider client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and persist the rider identity
    Login {
        full_name: String,
        password: String,
    },
    /// Register a new rider account
    Register {
        full_name: String,
        phone_number: String,
        password: String,
        /// Repeat the password; defaults to the password itself
        #[arg(long)]
        confirm_password: Option<String>,
        #[arg(long, default_value_t = 1)]
        college_id: i64,
        /// foot, bicycle or motorcycle
        #[arg(long, default_value = "foot")]
        transport: TransportType,
        /// Latitude of the rider's base position
        #[arg(long)]
        lat: Option<f64>,
        /// Longitude of the rider's base position
        #[arg(long)]
        lng: Option<f64>,
    },
    /// List unassigned orders, optionally keeping the feed open
    Orders {
        #[arg(long)]
        watch: bool,
    },
    /// Accept an order and store its delivery context
    Accept { order_id: i64 },
    /// Show the delivery map for the accepted order and watch its
    /// status
    Map,
    /// Toggle the remote active flag
    Toggle,
    /// Show the signed-in rider and any active order
    Status,
    /// Forget the persisted rider identity
    Logout,
    /// Write a default config file and print its location
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load();

    let store: Arc<dyn StateStore> = match Config::state_path() {
        Some(path) => Arc::new(FileStore::new(path)),
        None => Arc::new(MemoryStore::new()),
    };
    let state = ClientState::new(store);
    let backend: Arc<dyn RiderBackend> =
        Arc::new(ApiClient::new(config.backend_url.as_str()).context("backend client")?);

    match cli.command {
        Command::Login {
            full_name,
            password,
        } => {
            let outcome = submit_sign_in(backend.as_ref(), &state, &full_name, &password).await;
            report(outcome)?;
        }

        Command::Register {
            full_name,
            phone_number,
            password,
            confirm_password,
            college_id,
            transport,
            lat,
            lng,
        } => {
            let position = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
                _ => None,
            };
            let form = SignUpForm {
                full_name,
                phone_number,
                college_id,
                transport_type: transport,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
                position,
            };
            report(submit_sign_up(backend.as_ref(), form).await)?;
        }

        Command::Orders { watch } => {
            let screen = OrdersScreen::new(Arc::clone(&backend), state.clone());
            if watch {
                let (_task, mut feed) =
                    screen.watch_feed(Duration::from_secs(config.feed_refresh_secs));
                println!("Watching for unassigned orders (Ctrl-C to stop)");
                while let Some(orders) = feed.recv().await {
                    print_orders(&orders);
                }
            } else {
                let orders = screen.refresh().await?;
                print_orders(&orders);
            }
        }

        Command::Accept { order_id } => {
            let screen = OrdersScreen::new(Arc::clone(&backend), state.clone());
            report(screen.submit_accept(order_id).await)?;
        }

        Command::Map => {
            let routes: Arc<dyn RouteProvider> = Arc::new(
                MapboxDirections::with_endpoint(
                    &config.directions_url,
                    config.directions_token.as_str(),
                )?
                .with_profile(config.directions_profile.as_str()),
            );
            let mut screen = DeliveryScreen::mount(state.clone(), Arc::clone(&backend), routes)?;
            let locations = StoredLocation::new(state.clone());
            screen.load(&locations).await;

            let view = screen.map.view_state();
            println!("Order #{}", screen.order_id());
            println!(
                "Camera: center {:.5},{:.5} zoom {}",
                view.center.lat, view.center.lng, view.zoom
            );
            match screen.map.route() {
                Some(route) => println!(
                    "Route: {} / {}",
                    route.format_distance(),
                    route.format_duration()
                ),
                None => println!("Route: unavailable"),
            }
            println!("Call customer: {}", screen.call_link());
            println!("Navigate: {}", screen.navigation_link());

            let delay = Duration::from_secs(config.status_check_delay_secs);
            info!("first order-status check in {}s", delay.as_secs());
            match screen.watch_status(delay).await? {
                StatusSignal::ReturnToOrders { notice } => println!("{notice}"),
                StatusSignal::Stay => println!("Order still in progress."),
            }
        }

        Command::Toggle => {
            let rider_id = state.rider_id()?.context("not signed in")?;
            let active = backend.toggle_active(rider_id).await?;
            println!(
                "Rider is now {}",
                if active { "active" } else { "inactive" }
            );
        }

        Command::Status => {
            match session::load_session(&state)? {
                Session::Authenticated(profile) => {
                    println!("Signed in as {} (#{})", profile.display_name, profile.id);
                }
                Session::Unauthenticated => println!("Not signed in"),
            }
            match state.order_context()? {
                Some(context) => println!("Active order #{}", context.order_id),
                None => println!("No active order"),
            }
        }

        Command::Logout => {
            session::sign_out(&state)?;
            println!("Signed out");
        }

        Command::InitConfig => {
            config.save().context("write config file")?;
            match Config::config_path() {
                Some(path) => println!("Config written to {}", path.display()),
                None => println!("No config directory on this platform"),
            }
        }
    }

    Ok(())
}

fn report(outcome: FormOutcome) -> Result<()> {
    match outcome {
        FormOutcome::Success { notice, next } => {
            println!("{notice}");
            match next {
                Navigation::SignIn => println!("Run `courier login` to sign in."),
                Navigation::OrderList => println!("Run `courier orders` to see available orders."),
                Navigation::DeliveryMap => println!("Run `courier map` to start the delivery."),
            }
            Ok(())
        }
        FormOutcome::Failure(message) => anyhow::bail!(message),
    }
}

fn print_orders(orders: &[OrderSummary]) {
    if orders.is_empty() {
        println!("No orders available");
        return;
    }
    for order in orders {
        println!("#{:<8} total ${:.2}", order.id, order.total_amount);
    }
}
