//! Minimal Rocket service configured through a validated environment.
//!
//! ```text
//! HELLO_GREETING=hi HELLO_ADMINS=ann,bob cargo run -p rocket-hello
//! ```

use envgate::schema::{Schema, TypeDescriptor};
use envgate::{Env, EnvOptions, OnError, env_fairing, init_logging};
use log::info;
use rocket::serde::json::Json;
use rocket::{State, get, routes};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct Settings {
    greeting: String,
    admins: Vec<String>,
}

fn schema() -> Result<Schema, envgate::schema::SchemaError> {
    Schema::builder()
        .field(
            "GREETING",
            TypeDescriptor::string()
                .default("hello")
                .min_length(1)
                .description("Word used by /hello"),
        )
        .field(
            "ADMINS",
            TypeDescriptor::array(TypeDescriptor::string().min_length(1)).default(Vec::<String>::new()),
        )
        .field("VERBOSE", TypeDescriptor::boolean().default(false))
        .build()
}

#[get("/hello/<name>")]
fn hello(name: &str, env: &State<Env>) -> String {
    let greeting = env.get_str("GREETING").unwrap_or("hello");
    format!("{greeting}, {name}!")
}

#[get("/env")]
fn dump(env: &State<Env>) -> Json<Env> {
    Json(env.inner().clone())
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let options = EnvOptions::new()
        .with_prefix("HELLO_")
        .with_on_error(std::env::var("HELLO_ON_ERROR").map_or(Ok(OnError::Exit), |v| v.parse())?);
    let plugin = env_fairing(&schema()?, options)?;

    let settings: Settings = plugin.env().deserialize()?;
    info!(
        "starting rocket-hello (greeting={:?}, admins={})",
        settings.greeting,
        settings.admins.len()
    );

    let _ = rocket::build()
        .attach(plugin)
        .mount("/", routes![hello, dump])
        .launch()
        .await?;
    Ok(())
}
