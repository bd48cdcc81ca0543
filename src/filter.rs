//! Condition builders for list filtering.
//!
//! Free-text search (`?q=`) matches case-insensitively by lowering both the
//! column and the needle. SQLite's `LOWER()` only folds ASCII, so non-Latin
//! part names match case-sensitively there; `PostgreSQL` and `MySQL` fold the
//! full alphabet.

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

/// Escape `LIKE` wildcards in user input so a literal `%` or `_` in a search
/// term does not act as a pattern.
#[must_use]
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `LOWER(column) LIKE '%needle%'` with the needle lowered and escaped.
pub fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

/// Any of `columns` contains `needle`, case-insensitively.
pub fn any_contains_ci<C: ColumnTrait + Copy>(columns: &[C], needle: &str) -> Condition {
    let mut condition = Condition::any();
    for column in columns {
        condition = condition.add(contains_ci(*column, needle));
    }
    condition
}
