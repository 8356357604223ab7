use futuboard_core_types::{Column, ColumnId};
use std::collections::HashSet;

/// Key holding the bucket timestamp in every chart point.
pub const RESERVED_KEY: &str = "name";

/// Unique display name per column, in `ordernum` order.
///
/// A title already taken, or equal to [`RESERVED_KEY`], gets the smallest
/// free `" (k)"` suffix with `k >= 2`.
pub fn display_names(columns: &[Column]) -> Vec<(ColumnId, String)> {
    let mut ordered: Vec<&Column> = columns.iter().collect();
    ordered.sort_by_key(|column| column.ordernum);

    let mut used: HashSet<String> = HashSet::with_capacity(ordered.len());
    let mut names = Vec::with_capacity(ordered.len());
    for column in ordered {
        let name = if column.title == RESERVED_KEY || used.contains(&column.title) {
            first_free_suffix(&column.title, &used)
        } else {
            column.title.clone()
        };
        used.insert(name.clone());
        names.push((column.column_id, name));
    }
    names
}

fn first_free_suffix(title: &str, used: &HashSet<String>) -> String {
    let mut k = 2;
    loop {
        let candidate = format!("{title} ({k})");
        if !used.contains(&candidate) {
            return candidate;
        }
        k += 1;
    }
}
