use std::path::Path;

use anyhow::{Context, Result};
use flora_distribution::decode;
use flora_fetch::{
    CollectionOptions, DistributionOptions, EURO_MED_PLANT_ROOT, FetchConfig, ReqwestClient,
    RunSummary, fetch_collections, fetch_distributions, fetch_redlist, fetch_taxonomy,
};
use flora_model::RegionCatalog;
use tracing::{debug, info_span};

use flora_cli::summary::{occurrence_table, regions_table};

use crate::cli::{
    CollectionsArgs, DecodeArgs, DistributionArgs, FetchArgs, RedlistArgs, RegionsArgs,
    TaxonomyArgs,
};

pub fn run_taxonomy(args: &TaxonomyArgs) -> Result<RunSummary> {
    let root = args.root.as_deref().unwrap_or(EURO_MED_PLANT_ROOT);
    let _span = info_span!("taxonomy", root = %root).entered();
    let (config, client) = fetch_setup(&args.fetch)?;

    fetch_taxonomy(
        &client,
        &config,
        root,
        &args.output,
        args.fetch.existing_file(),
    )
    .with_context(|| format!("fetch taxonomy into {}", args.output.display()))
}

pub fn run_distribution(args: &DistributionArgs) -> Result<RunSummary> {
    let _span = info_span!("distribution", input = %args.input.display()).entered();
    let catalog = load_catalog(&args.catalog)?;
    let (config, client) = fetch_setup(&args.fetch)?;

    let options = DistributionOptions {
        existing: args.fetch.existing_file(),
        skip_existing: !args.no_skip_existing,
    };
    fetch_distributions(
        &client,
        &config,
        &catalog,
        &args.input,
        &args.output,
        options,
    )
    .with_context(|| format!("fetch distributions into {}", args.output.display()))
}

pub fn run_collections(args: &CollectionsArgs) -> Result<RunSummary> {
    let options = CollectionOptions {
        existing: args.fetch.existing_file(),
        level: args.level.into(),
        include_all_subspecies: !args.exact_subspecies,
    };
    let _span = info_span!("collections", level = %options.level).entered();
    let (config, client) = fetch_setup(&args.fetch)?;

    fetch_collections(&client, &config, &args.input, &args.output, options)
        .with_context(|| format!("fetch collections into {}", args.output.display()))
}

pub fn run_redlist(args: &RedlistArgs) -> Result<RunSummary> {
    let _span = info_span!("redlist").entered();
    let (config, client) = fetch_setup(&args.fetch)?;

    fetch_redlist(
        &client,
        &config,
        &args.taxa,
        &args.collections,
        &args.output,
        args.fetch.existing_file(),
    )
    .with_context(|| format!("fetch Red List assessments into {}", args.output.display()))
}

pub fn run_decode(args: &DecodeArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let occurrence = decode(&args.fragment, &catalog);
    println!("{}", occurrence_table(&catalog, &occurrence, args.present));
    Ok(())
}

pub fn run_regions(args: &RegionsArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    println!("{}", regions_table(&catalog));
    println!("{} regions", catalog.len());
    Ok(())
}

fn load_catalog(path: &Path) -> Result<RegionCatalog> {
    let catalog = RegionCatalog::load(path)
        .with_context(|| format!("load region catalog {}", path.display()))?;
    debug!(regions = catalog.len(), path = %path.display(), "loaded region catalog");
    Ok(catalog)
}

fn fetch_setup(args: &FetchArgs) -> Result<(FetchConfig, ReqwestClient)> {
    let config = FetchConfig::resolve(args.config.as_deref()).context("load fetch config")?;
    let client = ReqwestClient::new(&config).context("create HTTP client")?;
    Ok((config, client))
}
