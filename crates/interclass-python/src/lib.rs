//! PyO3 bindings for the inter-class statistics engine.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use interclass_core::config::StatsConfig;
use interclass_core::output::{export_tables, TablePaths};
use interclass_core::pipeline;

/// Python-visible statistics configuration.
#[pyclass]
#[derive(Clone)]
struct PyStatsConfig {
    #[pyo3(get, set)]
    network_name: String,
    #[pyo3(get, set)]
    tables_dir: String,
    #[pyo3(get, set)]
    class_scopes: Option<Vec<String>>,
    #[pyo3(get, set)]
    only_proteins: bool,
    #[pyo3(get, set)]
    complex_pattern: String,
    #[pyo3(get, set)]
    progress_interval: usize,
    #[pyo3(get, set)]
    timestamp_dirs: bool,
    #[pyo3(get, set)]
    verbose: bool,
    #[pyo3(get, set)]
    quiet: bool,
}

#[pymethods]
#[allow(clippy::too_many_arguments)]
impl PyStatsConfig {
    #[new]
    #[pyo3(signature = (
        network_name = String::from("omnipath"),
        tables_dir = String::from("tables"),
        class_scopes = None,
        only_proteins = true,
        complex_pattern = String::from(interclass_core::config::DEFAULT_COMPLEX_PATTERN),
        progress_interval = 100_000,
        timestamp_dirs = true,
        verbose = false,
        quiet = false,
    ))]
    fn new(
        network_name: String,
        tables_dir: String,
        class_scopes: Option<Vec<String>>,
        only_proteins: bool,
        complex_pattern: String,
        progress_interval: usize,
        timestamp_dirs: bool,
        verbose: bool,
        quiet: bool,
    ) -> Self {
        Self {
            network_name,
            tables_dir,
            class_scopes,
            only_proteins,
            complex_pattern,
            progress_interval,
            timestamp_dirs,
            verbose,
            quiet,
        }
    }
}

impl From<PyStatsConfig> for StatsConfig {
    fn from(py_config: PyStatsConfig) -> Self {
        StatsConfig {
            network_name: py_config.network_name,
            tables_dir: py_config.tables_dir,
            class_scopes: py_config.class_scopes,
            only_proteins: py_config.only_proteins,
            complex_pattern: py_config.complex_pattern,
            progress_interval: py_config.progress_interval,
            timestamp_dirs: py_config.timestamp_dirs,
            verbose: py_config.verbose,
            quiet: py_config.quiet,
            ..Default::default()
        }
    }
}

fn runtime_error(e: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyRuntimeError::new_err(e.to_string())
}

/// Compute the statistics and return the report as a Python dict.
///
/// With `export=True` the TSV tables are also written under `tables_dir`.
#[pyfunction]
#[pyo3(signature = (classes_path, network_path, config = None, progress = None, export = false))]
fn compute_stats(
    py: Python<'_>,
    classes_path: &str,
    network_path: &str,
    config: Option<PyStatsConfig>,
    progress: Option<PyObject>,
    export: bool,
) -> PyResult<Py<PyDict>> {
    let mut stats_config: StatsConfig = config.map(Into::into).unwrap_or_default();
    stats_config.classes_path = classes_path.to_string();
    stats_config.network_path = network_path.to_string();

    let progress_callback = progress.map(|py_cb| -> pipeline::ProgressCallback {
        Box::new(move |phase: &str, label: &str| {
            Python::with_gil(|py| {
                let _ = py_cb.call1(py, (phase, label));
            });
        })
    });

    let report =
        pipeline::run_from_config(&stats_config, progress_callback).map_err(runtime_error)?;

    if export {
        export_tables(&report, &stats_config, &TablePaths::today(&stats_config))
            .map_err(runtime_error)?;
    }

    let json_str = serde_json::to_string(&report).map_err(runtime_error)?;
    let json_module = py.import("json")?;
    let py_dict = json_module
        .call_method1("loads", (json_str,))?
        .extract::<Py<PyDict>>()?;

    Ok(py_dict)
}

/// Return the engine version.
#[pyfunction]
fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Inter-class connectivity statistics engine.
#[pymodule]
fn _interclass_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(compute_stats, m)?)?;
    m.add_function(wrap_pyfunction!(version, m)?)?;
    m.add_class::<PyStatsConfig>()?;
    Ok(())
}
