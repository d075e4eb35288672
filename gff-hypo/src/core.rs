use config::{CDS, HYPOTHETICAL_PROTEIN, ID, PRODUCT, PRODUCT_SOURCE};
use gff_ipr::entries::load_entries;
use gffpack::{rewrite_gff, GffError, GffRecord};
use log::info;

use crate::cli::Args;
use crate::utils::SourceCounter;

pub mod loaders;
pub mod normalizer;
pub mod resolver;

use loaders::{load_hierarchy, load_interpro_evidence, load_orthology, InterProFilter};
use normalizer::normalize;
use resolver::Resolver;

pub fn add_hypothetical_descriptions(args: Args) -> anyhow::Result<()> {
    info!("Loading reference tables...");

    let entries = load_entries(&args.ipr_entries)?;
    let levels = load_hierarchy(&args.ipr_hierarchy)?;
    let interpro = load_interpro_evidence(
        &args.ipr_output,
        &entries,
        &levels,
        &InterProFilter::default(),
    )?;
    let orthology = load_orthology(&args.eggnog_output)?;

    let resolver = Resolver::new(&orthology, &interpro, &args.gene_caller);
    let mut counter = SourceCounter::default();

    rewrite_gff(&args.input, &args.output, CDS, |record| {
        describe_record(record, &resolver, &mut counter)?;
        Ok(())
    })?;

    counter.log_summary();
    Ok(())
}

/// Name a hypothetical CDS and tag every CDS with its `product_source`.
pub fn describe_record(
    record: &mut GffRecord,
    resolver: &Resolver,
    counter: &mut SourceCounter,
) -> Result<(), GffError> {
    let protein = record.require(ID)?.to_string();

    if record.require(PRODUCT)? != HYPOTHETICAL_PROTEIN {
        record
            .attributes
            .insert_after(PRODUCT, PRODUCT_SOURCE, resolver.gene_caller());
        counter.inc_kept();
        return Ok(());
    }

    let resolved = resolver.resolve(&protein, &record.attributes);
    let resolved = normalize(resolved, &mut record.attributes, resolver.gene_caller());

    record.attributes.set(PRODUCT, resolved.function);
    record
        .attributes
        .insert_after(PRODUCT, PRODUCT_SOURCE, resolved.source.to_string());
    counter.inc_source(&resolved.source);

    Ok(())
}
