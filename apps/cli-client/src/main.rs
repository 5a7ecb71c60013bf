use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_sdk::{DEFAULT_BASE_URL, ObjectsClient};
use object_list::{FormFields, ListView, ObjectListController, ViewModel};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod web;

use web::WebState;

type Controller = ObjectListController<ObjectsClient, ViewModel>;

#[derive(Debug, Parser)]
#[command(name = "object-browser")]
#[command(about = "List, create, edit and delete objects of a remote objects REST service")]
struct Cli {
    #[arg(long, env = "OBJECT_BROWSER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        info: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        info: Option<String>,
    },
    Delete {
        id: String,
    },
    ServeWeb {
        #[arg(long, default_value = "127.0.0.1:8081")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let controller = Controller::new(ObjectsClient::new(&cli.base_url), ViewModel::default());

    match cli.command {
        Commands::List => {
            controller.start().await?;
            print_rows(&controller);
        }
        Commands::Create { name, info } => {
            controller.begin_create();
            controller.with_view(|view| view.set_form_fields(FormFields::new(name, info)));
            let saved = controller.submit().await?;
            println!("created '{}' (id {})", saved.object.name, saved.object.id);
            saved.refresh?;
            print_rows(&controller);
        }
        Commands::Update { id, name, info } => {
            controller.list().await?;
            controller.begin_edit_by_id(&id)?;
            controller.with_view(|view| {
                let mut fields = view.form_fields();
                if let Some(name) = name {
                    fields.name = name;
                }
                if let Some(info) = info {
                    fields.info = info;
                }
                view.set_form_fields(fields);
            });
            let saved = controller.submit().await?;
            println!("updated '{}' (id {})", saved.object.name, saved.object.id);
            saved.refresh?;
            print_rows(&controller);
        }
        Commands::Delete { id } => {
            controller.list().await?;
            controller.delete(&id).await?;
            println!("deleted {id}");
            print_rows(&controller);
        }
        Commands::ServeWeb { bind } => {
            let bind_addr: SocketAddr = bind.parse()?;
            let controller = Arc::new(controller);
            // The page still renders when the first load fails; Refresh retries.
            let _ = controller.start().await;

            let app = web::app(WebState { controller });

            info!(%bind_addr, base_url = %cli.base_url, "web interface listening");
            println!("web interface at http://{bind_addr}");
            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn print_rows(controller: &Controller) {
    controller.with_view(|view| {
        if view.rows.is_empty() {
            println!("(no objects)");
        }
        for row in &view.rows {
            println!("{}\t{}\t{}", row.id, row.name, row.data_text);
        }
    });
}
