//! Rocket integration: attach the validated environment as managed state.

use crate::{Env, EnvError, EnvOptions, load};
use envgate_schema::Schema;
use log::{debug, error};
use rocket::fairing::{self, Fairing, Info, Kind};
use rocket::{Build, Rocket};

/// Name the environment is attached under.
pub const ENV_DECORATOR: &str = "env";

/// Attachable unit carrying an already validated [`Env`].
///
/// Validation happens when the plugin is constructed, not when Rocket
/// ignites. Handlers read the result through `&State<Env>`:
///
/// ```no_run
/// # use envgate::{Env, EnvOptions, env_fairing};
/// # use envgate::schema::{Schema, TypeDescriptor};
/// # use rocket::{State, get, routes};
/// #[get("/port")]
/// fn port(env: &State<Env>) -> String {
///     env.get("PORT").map(ToString::to_string).unwrap_or_default()
/// }
///
/// # fn build() -> Result<rocket::Rocket<rocket::Build>, envgate::EnvError> {
/// let schema = Schema::builder()
///     .field("PORT", TypeDescriptor::integer().default(8000))
///     .build()?;
/// let rocket = rocket::build()
///     .attach(env_fairing(&schema, EnvOptions::new())?)
///     .mount("/", routes![port]);
/// # Ok(rocket)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EnvPlugin {
    env: Env,
}

impl EnvPlugin {
    /// Validate the environment now and wrap the result for attachment.
    pub fn new(schema: &Schema, options: EnvOptions) -> Result<Self, EnvError> {
        let env = load(schema, &options)?;
        Ok(Self { env })
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn into_env(self) -> Env {
        self.env
    }
}

#[rocket::async_trait]
impl Fairing for EnvPlugin {
    fn info(&self) -> Info {
        Info {
            name: ENV_DECORATOR,
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> fairing::Result {
        if rocket.state::<Env>().is_some() {
            error!("{ENV_DECORATOR} is already attached to this instance");
            return Err(rocket);
        }
        debug!(
            "attaching {ENV_DECORATOR} (fields={}, valid={})",
            self.env.len(),
            self.env.is_valid()
        );
        Ok(rocket.manage(self.env.clone()))
    }
}

/// Validate the environment and build the Rocket plugin.
pub fn env_fairing(schema: &Schema, options: EnvOptions) -> Result<EnvPlugin, EnvError> {
    EnvPlugin::new(schema, options)
}
