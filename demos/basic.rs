use flatconf::{Config, ConfigError};

const APP_CONF: &str = "
# Top-level fields
name      = demo
workspace = ${PWD}

[server]
host  = 127.0.0.1
port  = 8080
url   = http://$(server.host):$(server.port)
peers = [10.0.0.1, 10.0.0.2]
";

fn main() -> Result<(), ConfigError> {
    let mut config = Config::new();
    config.load(APP_CONF.as_bytes())?;

    println!("{} running in {}", config.get_string("name")?, config.get_string("workspace")?);
    println!("listening on {}", config.get_string("server.url")?);

    if let Some(server) = config.section("server") {
        for peer in server.get_strings("peers")? {
            println!("peer: {peer}");
        }
    }

    Ok(())
}
