use paypal_access_config::{ConnectionProperties, Endpoint};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), paypal_access_config::ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Bundled defaults, optionally overridden by a local TOML file
    let props = ConnectionProperties::builder()
        .with_bundled(paypal_access_config::DEFAULT_RESOURCE)
        .with_overrides_file("demos/endpoints.toml", false)
        .build()?;

    for endpoint in Endpoint::ALL {
        println!("{endpoint}: {}", props.endpoint(endpoint).unwrap_or("<unset>"));
    }

    props.init_sandbox();
    println!("--- sandbox ---");
    for endpoint in Endpoint::ALL {
        println!("{endpoint}: {}", props.endpoint(endpoint).unwrap_or("<unset>"));
    }

    Ok(())
}
