use bayesnet_error::BayesResult;

use crate::index_map;
use crate::table::Table;
use crate::variable::Variable;

/// Sums `variable` out of `table`, carrying the normalization scalar
/// unchanged. Summing a normalized table's remaining axes yields values
/// that already sum to 1 (up to floating-point error), so there is no
/// separate scale factor to divide out: unlike [`crate::factor::product`],
/// marginalization never changes the normalization.
pub fn marginalize(table: &Table, variable: &Variable) -> BayesResult<Table> {
    let new_domain = table.domain().without(variable)?;
    let remap = index_map::map(&new_domain, table.domain())?;
    let mut values = vec![0.0f64; new_domain.size()];
    for (i, &slot) in remap.as_slice().iter().enumerate() {
        values[slot] += table.values()[i];
    }
    Table::from_normalized(new_domain, values, table.normalization())
}
