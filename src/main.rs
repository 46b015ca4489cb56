use clap::{load_yaml, App};
use product_bundle::series::ProductBundle;
use product_bundle::utils::{self, Config};

fn main() -> anyhow::Result<()> {
    utils::init_logging()?;

    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml).get_matches();
    let config = Config::try_from(&matches)?;

    let table = utils::load_table(&config.table, config.policy)?;
    let bundle = ProductBundle::e6(&table, config.exterior)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    utils::write_report(&mut out, &bundle, config.max, config.json)
}
