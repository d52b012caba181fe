use chrono::{Local, NaiveDateTime};
use clap::{Parser, crate_version};
use luz::{
    cli::{Args, Command, DayArgs, NowArgs},
    core::{day::LogicalDay, pipeline::Pipeline},
    prelude::*,
    render,
    tables::{build_prices_table, build_summary_table},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let pipeline = Pipeline::try_new(args.config.into_config())?;
    let now_local = Local::now().naive_local();

    match args.command {
        Command::Today(args) => day(&pipeline, LogicalDay::Today, now_local, &args).await?,
        Command::Tomorrow(args) => day(&pipeline, LogicalDay::Tomorrow, now_local, &args).await?,
        Command::Now(args) => now(&pipeline, now_local, &args).await?,
    }

    info!("done!");
    Ok(())
}

async fn day(
    pipeline: &Pipeline,
    day: LogicalDay,
    now_local: NaiveDateTime,
    args: &DayArgs,
) -> Result {
    let prices = pipeline.hourly_prices(day, now_local).await?;
    if prices.is_empty() {
        warn!(?day, "the upstream has not published this day yet");
    }
    let summary = args.summary.then(|| pipeline.summarize(&prices)).transpose()?;

    if args.json {
        println!("{}", render::to_json(day.date(now_local), &prices, summary.as_ref())?);
    } else {
        println!("{}", build_prices_table(&prices));
        if let Some(summary) = &summary {
            println!("{}", build_summary_table(summary));
        }
    }
    Ok(())
}

async fn now(pipeline: &Pipeline, now_local: NaiveDateTime, args: &NowArgs) -> Result {
    let price = pipeline
        .current_price(now_local)
        .await?
        .context("the upstream has no price for the current hour")?;

    if args.json {
        println!("{}", render::price_to_json(&price)?);
    } else {
        println!("{}", build_prices_table(std::slice::from_ref(&price)));
    }
    Ok(())
}
