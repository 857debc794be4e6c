mod command;
mod logging;
mod record;
mod schema;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
