//! Delimited-text and JSON export of statistics reports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::{
    AnnotationRecord, ConnectionRecord, CoverageRecord, OverlapRecord, PairwiseStatsRecord,
    StatsConfig, StatsReport,
};

/// Date stamp used in output directory and file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d";

/// A record that can be written as one line of a delimited table.
pub trait TableRow {
    fn header() -> &'static [&'static str];
    fn fields(&self) -> Vec<String>;
}

impl TableRow for PairwiseStatsRecord {
    fn header() -> &'static [&'static str] {
        &[
            "name_cls0", "name_cls1", "cls_label0", "cls_label1", "src_label0", "src_label1",
            "aspect0", "aspect1", "typ_cls0", "typ_cls1", "total", "network", "parent0",
            "parent1", "size_cls0", "size_cls1", "overlap_cls01", "in_network_cls0",
            "in_network_cls1", "size_parent0", "size_parent1", "con_all", "con_0to1",
            "con_0to1_stim", "con_0to1_inh", "con_1to0", "con_1to0_stim", "con_1to0_inh",
            "deg_total0", "deg_total1", "deg_undir0", "deg_undir1", "deg_in0", "deg_in1",
            "deg_out0", "deg_out1", "deg_in0_stim", "deg_in1_stim", "deg_out0_stim",
            "deg_out1_stim", "deg_in0_inh", "deg_in1_inh", "deg_out0_inh", "deg_out1_inh",
            "con_network", "con_network_undir", "con_network_dir", "con_network_stim",
            "con_network_inh",
        ]
    }

    fn fields(&self) -> Vec<String> {
        let text = [
            &self.name_cls0,
            &self.name_cls1,
            &self.cls_label0,
            &self.cls_label1,
            &self.src_label0,
            &self.src_label1,
            &self.aspect0,
            &self.aspect1,
            &self.typ_cls0,
            &self.typ_cls1,
        ];
        let mut fields: Vec<String> = text.iter().map(|s| s.to_string()).collect();
        fields.push(self.total.to_string());
        fields.push(self.network.to_string());
        fields.push(self.parent0.clone());
        fields.push(self.parent1.clone());
        let numbers = [
            self.size_cls0,
            self.size_cls1,
            self.overlap_cls01,
            self.in_network_cls0,
            self.in_network_cls1,
            self.size_parent0,
            self.size_parent1,
            self.con_all,
            self.con_0to1,
            self.con_0to1_stim,
            self.con_0to1_inh,
            self.con_1to0,
            self.con_1to0_stim,
            self.con_1to0_inh,
            self.deg_total0,
            self.deg_total1,
            self.deg_undir0,
            self.deg_undir1,
            self.deg_in0,
            self.deg_in1,
            self.deg_out0,
            self.deg_out1,
            self.deg_in0_stim,
            self.deg_in1_stim,
            self.deg_out0_stim,
            self.deg_out1_stim,
            self.deg_in0_inh,
            self.deg_in1_inh,
            self.deg_out0_inh,
            self.deg_out1_inh,
            self.con_network,
            self.con_network_undir,
            self.con_network_dir,
            self.con_network_stim,
            self.con_network_inh,
        ];
        fields.extend(numbers.iter().map(|n| n.to_string()));
        fields
    }
}

impl TableRow for CoverageRecord {
    fn header() -> &'static [&'static str] {
        &["typ", "cls", "cls_label", "resource", "entity_type", "total", "in_network"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.typ.clone(),
            self.cls.clone(),
            self.cls_label.clone(),
            self.resource.clone(),
            self.entity_type.to_string(),
            self.total.to_string(),
            self.in_network.to_string(),
        ]
    }
}

impl TableRow for OverlapRecord {
    fn header() -> &'static [&'static str] {
        &["cat0", "cat1", "size0", "size1", "total", "overlap"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.cat0.clone(),
            self.cat1.clone(),
            self.size0.to_string(),
            self.size1.to_string(),
            self.total.to_string(),
            self.overlap.to_string(),
        ]
    }
}

impl TableRow for ConnectionRecord {
    fn header() -> &'static [&'static str] {
        &["cat0", "cat1", "label0", "label1", "size0", "size1", "conn"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.cat0.clone(),
            self.cat1.clone(),
            self.label0.clone(),
            self.label1.clone(),
            self.size0.to_string(),
            self.size1.to_string(),
            self.conn.to_string(),
        ]
    }
}

impl TableRow for AnnotationRecord {
    fn header() -> &'static [&'static str] {
        &[
            "entity_id",
            "is_complex",
            "cls",
            "parent",
            "resource_label",
            "class_label",
            "class_type",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.entity_id.clone(),
            self.is_complex.to_string(),
            self.cls.clone(),
            self.parent.clone(),
            self.resource_label.clone(),
            self.class_label.clone(),
            self.class_type.clone(),
        ]
    }
}

/// Write rows as a tab-separated table with a header line.
pub fn write_tsv<T: TableRow>(rows: &[T], path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", T::header().join("\t"))?;
    for row in rows {
        writeln!(writer, "{}", row.fields().join("\t"))?;
    }
    writer.flush()?;
    log::info!("Table has been written to `{}`.", path.display());
    Ok(())
}

/// Resolves table paths as `<tables_dir>[/<stamp>]/<name>__<stamp>.tsv`.
pub struct TablePaths {
    dir: PathBuf,
    stamp: String,
}

impl TablePaths {
    pub fn new(config: &StatsConfig, stamp: &str) -> Self {
        let mut dir = PathBuf::from(&config.tables_dir);
        if config.timestamp_dirs {
            dir.push(stamp);
        }
        Self {
            dir,
            stamp: stamp.to_string(),
        }
    }

    /// Paths stamped with today's date.
    pub fn today(config: &StatsConfig) -> Self {
        Self::new(config, &Local::now().format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn table(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}__{}.tsv", self.stamp))
    }
}

/// Base name of the pairwise table: network, entity filter and class scopes.
pub fn pairwise_table_name(config: &StatsConfig) -> String {
    let entities = if config.only_proteins {
        "proteins"
    } else {
        "all-entities"
    };
    let scopes = match &config.class_scopes {
        Some(scopes) if !scopes.is_empty() => {
            let mut sorted = scopes.clone();
            sorted.sort();
            sorted.join("-")
        }
        _ => "all-class-levels".to_string(),
    };
    format!(
        "stats_by_resource_{}_{}_{}",
        config.network_name, entities, scopes
    )
}

/// Write every table of the report; returns the written paths.
pub fn export_tables(
    report: &StatsReport,
    config: &StatsConfig,
    paths: &TablePaths,
) -> std::io::Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let path = paths.table(&pairwise_table_name(config));
    write_tsv(&report.pairwise, &path)?;
    written.push(path);

    let path = paths.table(&format!("main_coverage_{}", config.network_name));
    write_tsv(&report.coverage, &path)?;
    written.push(path);

    let path = paths.table("category_overlaps");
    write_tsv(&report.overlaps, &path)?;
    written.push(path);

    let path = paths.table("annots_by_entity");
    write_tsv(&report.annotations, &path)?;
    written.push(path);

    for (mode, rows) in &report.connections {
        let path = paths.table(&format!("connections_{}_{}", config.network_name, mode));
        write_tsv(rows, &path)?;
        written.push(path);
    }

    Ok(written)
}

/// Write the whole report as pretty-printed JSON.
pub fn write_report(report: &StatsReport, output_path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(output_path, json)
}
