//! Rocket attachment through the env fairing.

use envgate::schema::{Schema, TypeDescriptor};
use envgate::{ENV_DECORATOR, Env, EnvOptions, OnError, Source, env_fairing, env_plugin};
use envgate_test_utils::{Recorder, string_map};
use pretty_assertions::assert_eq;
use rocket::fairing::Fairing;
use rocket::http::Status;
use rocket::local::blocking::Client;
use rocket::{Build, Rocket, State, get, routes};

#[get("/port")]
fn port(env: &State<Env>) -> Option<String> {
    env.get_u64("PORT").map(|port| port.to_string())
}

#[get("/valid")]
fn valid(env: &State<Env>) -> &'static str {
    if env.is_valid() { "yes" } else { "no" }
}

fn schema() -> Schema {
    Schema::builder()
        .field("PORT", TypeDescriptor::integer().default(8000))
        .field("NAME", TypeDescriptor::string())
        .build()
        .expect("schema")
}

fn options(pairs: &[(&str, &str)]) -> EnvOptions {
    EnvOptions::new()
        .with_source(Source::Map(string_map(pairs)))
        .with_on_error(OnError::Silent)
}

fn app(plugin: impl Fairing) -> Rocket<Build> {
    rocket::build().attach(plugin).mount("/", routes![port, valid])
}

#[test]
fn handlers_read_attached_env() {
    let plugin = env_fairing(&schema(), options(&[("PORT", "9090"), ("NAME", "api")]))
        .expect("plugin");
    let client = Client::tracked(app(plugin)).expect("rocket");

    let response = client.get("/port").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().as_deref(), Some("9090"));
    assert_eq!(client.get("/valid").dispatch().into_string().as_deref(), Some("yes"));
}

#[test]
fn managed_state_is_the_loaded_env() {
    let plugin = env_fairing(&schema(), options(&[("NAME", "api")])).expect("plugin");
    let expected = plugin.env().clone();
    let client = Client::tracked(app(plugin)).expect("rocket");
    assert_eq!(client.rocket().state::<Env>(), Some(&expected));
}

#[test]
fn validation_runs_at_construction() {
    let successes: Recorder<Env> = Recorder::new();
    let recorder = successes.clone();
    let plugin = env_fairing(
        &schema(),
        options(&[("NAME", "api")]).with_on_success(move |env| {
            recorder.record(env.clone());
            Ok(())
        }),
    )
    .expect("plugin");

    assert_eq!(successes.count(), 1);
    let _client = Client::tracked(app(plugin)).expect("rocket");
    assert_eq!(successes.count(), 1);
}

#[test]
fn invalid_env_is_still_attached_under_lenient_policy() {
    let plugin = env_fairing(&schema(), options(&[])).expect("plugin");
    assert!(!plugin.env().is_valid());
    let client = Client::tracked(app(plugin)).expect("rocket");
    assert_eq!(client.get("/port").dispatch().into_string().as_deref(), Some("8000"));
    assert_eq!(client.get("/valid").dispatch().into_string().as_deref(), Some("no"));
}

#[test]
fn attaching_twice_fails_ignition() {
    let first = env_fairing(&schema(), options(&[("NAME", "a")])).expect("first");
    let second = env_fairing(&schema(), options(&[("NAME", "b")])).expect("second");
    let rocket = app(first).attach(second);
    assert!(Client::tracked(rocket).is_err());
}

#[test]
fn plugin_alias_behaves_identically() {
    let via_fairing = env_fairing(&schema(), options(&[("NAME", "api")])).expect("fairing");
    let via_plugin = env_plugin(&schema(), options(&[("NAME", "api")])).expect("plugin");
    assert_eq!(via_fairing.env(), via_plugin.env());
    assert_eq!(via_plugin.info().name, ENV_DECORATOR);
    assert_eq!(via_plugin.into_env().get_str("NAME"), Some("api"));
}
