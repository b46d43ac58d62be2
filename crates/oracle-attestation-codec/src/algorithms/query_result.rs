//! # Query Result Decoder
//!
//! Generic row/column results: ABI `bytes[][]`, one inner array per row, one
//! canonical value encoding per cell.
//!
//! The head/tail layout is walked before the ABI library decodes anything.
//! Every row and cell must start after the previous one ends, so offsets
//! cannot alias one tail many times and the decoded cells never outgrow the
//! input.

use super::abi_head::{read_count, read_offset, WORD};
use crate::domain::{
    invariant_within_buffer, CodecError, Field, QueryResult, SecurityLimits, ValueLocation,
};
use crate::ports::outbound::{AbiCodec, AbiKind, AbiValue, ValueCodec};
use tracing::debug;

fn malformed(reason: String) -> CodecError {
    CodecError::MalformedValue {
        location: ValueLocation::Field(Field::QueryResult),
        reason,
    }
}

fn overlapping(what: &str, start: usize, previous_end: usize) -> CodecError {
    malformed(format!(
        "{what} starts at byte {start}, inside data ending at byte {previous_end}"
    ))
}

/// Start of the data that follows `count` head words at `base`.
fn heads_end(data: &[u8], base: usize, count: usize) -> Result<usize, CodecError> {
    let heads = count.saturating_mul(WORD);
    invariant_within_buffer(Field::QueryResult, base, heads, data.len())?;
    Ok(base + heads)
}

/// Check the `bytes[][]` layout and every cap without allocating.
fn check_matrix_layout(data: &[u8], limits: &SecurityLimits) -> Result<(), CodecError> {
    let rows_at = read_offset(data, 0, Field::AbiHead(0))?;
    let rows = limits.check_rows(read_count(data, rows_at, Field::AbiArrayLength("rows"))?)?;
    let row_base = rows_at + WORD;
    let mut end = heads_end(data, row_base, rows)?;

    for row in 0..rows {
        let row_at = row_base + read_offset(data, row_base + row * WORD, Field::QueryResult)?;
        if row_at < end {
            return Err(overlapping(&format!("row {row}"), row_at, end));
        }
        let columns = limits.check_columns(read_count(
            data,
            row_at,
            Field::AbiArrayLength("columns"),
        )?)?;
        let cell_base = row_at + WORD;
        end = heads_end(data, cell_base, columns)?;

        for column in 0..columns {
            let cell_at =
                cell_base + read_offset(data, cell_base + column * WORD, Field::QueryResult)?;
            if cell_at < end {
                return Err(overlapping(
                    &format!("row {row}, column {column}"),
                    cell_at,
                    end,
                ));
            }
            let len = read_offset(data, cell_at, Field::QueryResult)?;
            let padded = len.div_ceil(WORD) * WORD;
            invariant_within_buffer(Field::QueryResult, cell_at + WORD, padded, data.len())?;
            end = cell_at + WORD + padded;
        }
    }
    Ok(())
}

/// Decode a query result. Empty input is an empty result.
pub fn decode_query_result(
    bytes: &[u8],
    values: &dyn ValueCodec,
    abi: &dyn AbiCodec,
    limits: &SecurityLimits,
) -> Result<QueryResult, CodecError> {
    if bytes.is_empty() {
        return Ok(QueryResult::default());
    }
    check_matrix_layout(bytes, limits)?;

    let decoded = abi
        .unpack(&[AbiKind::BytesMatrix], bytes)
        .map_err(|e| malformed(e.to_string()))?;
    let raw_rows = match decoded.into_iter().next() {
        Some(AbiValue::BytesMatrix(rows)) => rows,
        other => return Err(malformed(format!("expected bytes[][], got {other:?}"))),
    };

    let mut rows = Vec::with_capacity(raw_rows.len());
    for (row_index, raw_row) in raw_rows.iter().enumerate() {
        let columns = limits.check_columns(raw_row.len() as u64)?;
        let mut row = Vec::with_capacity(columns);
        for (column, cell) in raw_row.iter().enumerate() {
            let value = values.decode(cell).map_err(|e| CodecError::MalformedValue {
                location: ValueLocation::Cell {
                    row: row_index,
                    column,
                },
                reason: e.to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    debug!("[attestation] Decoded query result with {} rows", rows.len());
    Ok(QueryResult { rows })
}

/// Encode a query result.
pub fn encode_query_result(
    result: &QueryResult,
    values: &dyn ValueCodec,
    abi: &dyn AbiCodec,
) -> Result<Vec<u8>, CodecError> {
    let mut rows = Vec::with_capacity(result.rows.len());
    for (row_index, row) in result.rows.iter().enumerate() {
        let cells = row
            .iter()
            .enumerate()
            .map(|(column, value)| {
                values.encode(value).map_err(|e| CodecError::MalformedValue {
                    location: ValueLocation::Cell {
                        row: row_index,
                        column,
                    },
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(cells);
    }
    Ok(abi.pack(&[AbiValue::BytesMatrix(rows)]))
}
