use anyhow::Context;
use clap::Parser;
use inquire::Text;

use wttr_core::{CityQuery, fetch, report};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wttr", version, about = "Current weather for a city, via wttr.in")]
pub struct Cli {
    /// City name. When omitted, the city is asked for interactively.
    pub city: Option<String>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let raw = match self.city {
            Some(city) => city,
            None => prompt_city()?,
        };
        let city = CityQuery::new(&raw)?;

        let body = fetch(&city)
            .with_context(|| format!("Failed to fetch weather data for {city}"))?;

        let outcome = report(Some(&body));
        let text = outcome.render(&city);
        if outcome.is_diagnostic() {
            eprint!("{text}");
        } else {
            print!("{text}");
        }

        // Any outcome that reached rendering counts as a completed run.
        Ok(())
    }
}

fn prompt_city() -> anyhow::Result<String> {
    Text::new("Погода в каком городе вас интересует?")
        .prompt()
        .context("Failed to read city name")
}
