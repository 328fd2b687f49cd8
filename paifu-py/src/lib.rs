//! Python bindings for the paifu game-record analyzer.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use paifu_core::MatchLog;
use paifu_engine::{Analyzer, AnalyzerRule};

mod convert;

/// Analyze a `MessageToDict(GameDetailRecords)` JSON document (or a bare
/// action list) and return the report as a dict.
#[pyfunction]
#[pyo3(signature = (json, rule=None))]
fn analyze_json<'py>(
    py: Python<'py>,
    json: &str,
    rule: Option<AnalyzerRule>,
) -> PyResult<Bound<'py, PyDict>> {
    let analyzer = Analyzer::new(rule.unwrap_or_default());
    let report = py.allow_threads(|| analyzer.analyze_json(json))?;
    convert::report_dict(py, &report)
}

/// Analyze the `data` bytes of a fetched game record.
#[pyfunction]
#[pyo3(signature = (data, rule=None))]
fn analyze_record<'py>(
    py: Python<'py>,
    data: &[u8],
    rule: Option<AnalyzerRule>,
) -> PyResult<Bound<'py, PyDict>> {
    let analyzer = Analyzer::new(rule.unwrap_or_default());
    let report = py.allow_threads(|| analyzer.analyze_record(data))?;
    convert::report_dict(py, &report)
}

/// Record, statistics and yaku sheet rows for a match document with
/// `uuid`, `startTime`, `endTime`, `accounts`, `result` and `actions`.
#[pyfunction]
#[pyo3(signature = (json, rule=None))]
fn export_rows<'py>(
    py: Python<'py>,
    json: &str,
    rule: Option<AnalyzerRule>,
) -> PyResult<(Bound<'py, PyList>, Bound<'py, PyList>, Bound<'py, PyList>)> {
    let log = MatchLog::from_json(json).map_err(|e| PyValueError::new_err(format!("{:#}", e)))?;
    let analyzer = Analyzer::new(rule.unwrap_or_default());
    let result = py.allow_threads(|| log.analyze(&analyzer));
    convert::export_rows(py, &result)
}

#[pymodule]
fn _paifu(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<AnalyzerRule>()?;
    m.add_function(wrap_pyfunction!(analyze_json, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_record, m)?)?;
    m.add_function(wrap_pyfunction!(export_rows, m)?)?;
    Ok(())
}
