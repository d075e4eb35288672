use hashbrown::HashMap;
use log::info;

use crate::core::resolver::FunctionSource;

/// Tally of resolved products per source label
#[derive(Debug, Default)]
pub struct SourceCounter {
    resolved: HashMap<String, u32>,
    kept: u32,
}

impl SourceCounter {
    pub fn inc_source(&mut self, source: &FunctionSource) {
        *self.resolved.entry(source.to_string()).or_insert(0) += 1;
    }

    /// CDS records that already carried a real product
    pub fn inc_kept(&mut self) {
        self.kept += 1;
    }

    pub fn get(&self, label: &str) -> u32 {
        self.resolved.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.resolved.values().sum()
    }

    pub fn kept(&self) -> u32 {
        self.kept
    }

    pub fn log_summary(&self) {
        info!(
            "Hypothetical proteins processed: {}, products kept from the gene caller: {}",
            self.total(),
            self.kept
        );

        let mut labels = self.resolved.iter().collect::<Vec<_>>();
        labels.sort_unstable_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (label, count) in labels {
            info!("  {}: {}", label, count);
        }
    }
}
