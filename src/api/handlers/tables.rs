use actix_web::{web, HttpResponse};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::table::{ColumnKind, SortDirection, Table};
use crate::table::sorter;
use crate::utils::error::{AppError, AppResult};

/// Sort table request
#[derive(Deserialize)]
pub struct SortTableBody {
    /// Header row followed by data rows
    rows: Vec<Vec<String>>,

    /// Index of the clicked column
    column: usize,

    /// Optional per-column kinds; unspecified columns use the header label
    #[serde(default)]
    column_kinds: Vec<ColumnKind>,
}

/// Response for a sorted table
#[derive(Serialize)]
struct SortTableResponse {
    rows: Vec<Vec<String>>,
    direction: SortDirection,
}

/// Sort a table by one column
pub async fn sort_table(body: web::Json<SortTableBody>) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let mut table = Table::with_column_kinds(body.rows, body.column_kinds);

    let columns = table.column_count();
    if body.column >= columns {
        warn!("Rejected sort on column {} of a {}-column table", body.column, columns);
        return Err(AppError::ColumnOutOfRange {
            column: body.column,
            columns,
        });
    }

    let direction = sorter::sort(&mut table, body.column);

    Ok(HttpResponse::Ok().json(SortTableResponse {
        rows: table.rows,
        direction,
    }))
}
