use pyo3::prelude::*;

use crate::errors::EvalError;
use crate::scoring::{self, WinContext};
use crate::tile::Tile;

fn to_tiles(indices: &[usize]) -> PyResult<Vec<Tile>> {
    indices
        .iter()
        .map(|&i| {
            Tile::from_index(i).ok_or_else(|| {
                EvalError::InconsistentHand {
                    message: format!("tile index {} out of range 0..=33", i),
                }
                .into()
            })
        })
        .collect()
}

/// Shanten of a list of tile indices (0..=33).
#[pyfunction]
fn shanten_py(hand: Vec<usize>) -> PyResult<i8> {
    crate::ensure_init();
    Ok(crate::shanten(&to_tiles(&hand)?))
}

#[pyfunction]
fn useful_tiles_py(hand: Vec<usize>) -> PyResult<Vec<usize>> {
    crate::ensure_init();
    Ok(crate::useful_tiles(&to_tiles(&hand)?))
}

/// Returns:
///   List[ (discard_index, shanten_after, acceptance_indices, total_acceptance) ]
#[pyfunction]
fn acceptance_py(hand: Vec<usize>, visible: Vec<usize>) -> PyResult<Vec<(usize, i8, Vec<usize>, u32)>> {
    crate::ensure_init();
    let infos = crate::calculate_acceptance(&to_tiles(&hand)?, &to_tiles(&visible)?);
    Ok(infos
        .into_iter()
        .map(|info| {
            (
                info.tile_index,
                info.shanten_after_discard,
                info.acceptance_tiles,
                info.total_acceptance,
            )
        })
        .collect())
}

#[pyfunction]
fn can_riichi_py(hand: Vec<usize>) -> PyResult<bool> {
    crate::ensure_init();
    Ok(crate::can_declare_ready(&to_tiles(&hand)?))
}

/// Returns:
///   (is_win, yaku [(name, han)], total_han, fu, total_points, payment_info, yakuman)
#[pyfunction]
#[pyo3(signature = (hand, win_tile, is_tsumo=false, is_riichi=false, is_dealer=false, dora_indicators=vec![]))]
fn score_py(
    hand: Vec<usize>,
    win_tile: usize,
    is_tsumo: bool,
    is_riichi: bool,
    is_dealer: bool,
    dora_indicators: Vec<usize>,
) -> PyResult<(bool, Vec<(String, u32)>, u32, u32, u32, String, u32)> {
    let tiles = to_tiles(&hand)?;
    let win = to_tiles(&[win_tile])?.remove(0);
    let ctx = WinContext {
        is_tsumo,
        is_riichi,
        is_dealer,
        dora_indicators: to_tiles(&dora_indicators)?,
        ..WinContext::default()
    };
    let r = scoring::score(&tiles, &win, &ctx);
    Ok((
        r.is_win,
        r.yaku.into_iter().map(|y| (y.name, y.han)).collect(),
        r.total_han,
        r.fu,
        r.total_points,
        r.payment_info,
        r.yakuman,
    ))
}

#[pymodule]
fn mahjong_eval(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(shanten_py, m)?)?;
    m.add_function(wrap_pyfunction!(useful_tiles_py, m)?)?;
    m.add_function(wrap_pyfunction!(acceptance_py, m)?)?;
    m.add_function(wrap_pyfunction!(can_riichi_py, m)?)?;
    m.add_function(wrap_pyfunction!(score_py, m)?)?;
    Ok(())
}
