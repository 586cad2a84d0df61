use anupalan::calendar::{self, BsDate};
use chrono::NaiveDate;
use clap::Parser;
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Convert a date between Gregorian and Bikram Sambat")]
pub struct Convert {
    /// The date to convert (YYYY-MM-DD)
    date: String,

    /// Treat the input as a Bikram Sambat date instead of Gregorian
    #[arg(long)]
    from_bs: bool,
}

impl Convert {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        if self.from_bs {
            let bs = parse_bs(&self.date)?;
            let gregorian = calendar::to_gregorian(bs)?;
            println!("{} BS = {gregorian} AD", bs.format_long());
        } else {
            let gregorian: NaiveDate = self.date.parse()?;
            let bs = calendar::to_bs(gregorian)?;
            println!("{gregorian} AD = {} BS", bs.format_long());
        }
        Ok(())
    }
}

fn parse_bs(input: &str) -> anyhow::Result<BsDate> {
    let mut parts = input.splitn(3, '-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        anyhow::bail!("expected a date in YYYY-MM-DD form");
    };
    Ok(BsDate::new(year.parse()?, month.parse()?, day.parse()?)?)
}
