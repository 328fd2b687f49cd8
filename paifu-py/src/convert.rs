//! Report → Python dict/list conversion.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use paifu_core::{MatchReport, RecordRow, StatisticsRow, YakuRow};
use paifu_engine::report::{Report, SeatSummary};
use paifu_engine::yaku::WinRecord;

fn seat_dict<'py>(py: Python<'py>, seat: u8, s: &SeatSummary) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("seat", seat)?;
    dict.set_item("ron", s.ron)?;
    dict.set_item("tsumo", s.tsumo)?;
    dict.set_item("houju", s.houju)?;
    dict.set_item("riichi", s.riichi)?;
    dict.set_item("furo", s.furo)?;
    dict.set_item("dama", s.dama)?;
    dict.set_item("chase_riichi", s.chase_riichi)?;
    dict.set_item("hora", s.hora)?;
    Ok(dict)
}

fn win_dict<'py>(py: Python<'py>, w: &WinRecord) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("round", w.round_index)?;
    dict.set_item("seat", w.seat)?;
    dict.set_item("fan_id", w.component_id)?;
    dict.set_item("fan", w.component_name.as_str())?;
    dict.set_item("han", w.han_value)?;
    Ok(dict)
}

/// `{"total_rounds": int, "per_seat": [dict; 4], "win_records": [dict]}`
pub fn report_dict<'py>(py: Python<'py>, report: &Report) -> PyResult<Bound<'py, PyDict>> {
    let per_seat = PyList::empty(py);
    for (seat, summary) in report.per_seat.iter().enumerate() {
        per_seat.append(seat_dict(py, seat as u8, summary)?)?;
    }
    let wins = PyList::empty(py);
    for record in &report.win_records {
        wins.append(win_dict(py, record)?)?;
    }

    let dict = PyDict::new(py);
    dict.set_item("total_rounds", report.total_rounds)?;
    dict.set_item("per_seat", per_seat)?;
    dict.set_item("win_records", wins)?;
    Ok(dict)
}

fn statistics_list<'py>(py: Python<'py>, row: &StatisticsRow) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    list.append(row.uuid.as_str())?;
    list.append(row.account_id)?;
    for value in [
        row.total_kyoku,
        row.riichi,
        row.hora,
        row.tsumo,
        row.ron,
        row.houju,
        row.furo,
        row.dama,
        row.chase_riichi,
    ] {
        list.append(value)?;
    }
    Ok(list)
}

fn record_list<'py>(py: Python<'py>, row: &RecordRow) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    list.append(row.start_time.as_str())?;
    list.append(row.end_time.as_str())?;
    list.append(if row.deleted { "yes" } else { "no" })?;
    for player in &row.players {
        list.append(player.account_id)?;
        list.append(player.nickname.as_str())?;
        list.append(player.part_point)?;
        list.append(player.total_point_k())?;
    }
    list.append(row.uuid.as_str())?;
    Ok(list)
}

fn yaku_list<'py>(py: Python<'py>, row: &YakuRow) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    list.append(row.uuid.as_str())?;
    list.append(row.round_index)?;
    list.append(row.account_id)?;
    list.append(row.fan.as_str())?;
    list.append(row.han)?;
    Ok(list)
}

/// Sheet rows of one match: `(record_row, statistics_rows, yaku_rows)`.
pub fn export_rows<'py>(
    py: Python<'py>,
    result: &MatchReport,
) -> PyResult<(Bound<'py, PyList>, Bound<'py, PyList>, Bound<'py, PyList>)> {
    let record = record_list(py, result.record_row())?;
    let stats = PyList::empty(py);
    for row in result.statistics_rows() {
        stats.append(statistics_list(py, &row)?)?;
    }
    let yaku = PyList::empty(py);
    for row in result.yaku_rows() {
        yaku.append(yaku_list(py, &row)?)?;
    }
    Ok((record, stats, yaku))
}
