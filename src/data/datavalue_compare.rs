use crate::data::datatable::DataValue;
use std::cmp::Ordering;

/// Total order over cell values, so sorting a column can never fail.
/// Same-type cells compare naturally, integers and floats compare by
/// numeric value, and nulls order before everything. Cells of unlike
/// types fall back to a fixed rank (booleans, then numbers, then text,
/// then dates), which is how a malformed numeric cell ends up sorting
/// as text instead of raising an error.
pub fn compare_datavalues(a: &DataValue, b: &DataValue) -> Ordering {
    match (a, b) {
        (DataValue::Null, DataValue::Null) => Ordering::Equal,
        (DataValue::Null, _) => Ordering::Less,
        (_, DataValue::Null) => Ordering::Greater,

        (DataValue::Integer(x), DataValue::Integer(y)) => x.cmp(y),
        (DataValue::Float(x), DataValue::Float(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (DataValue::Integer(x), DataValue::Float(y)) => {
            (*x as f64).partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (DataValue::Float(x), DataValue::Integer(y)) => {
            x.partial_cmp(&(*y as f64)).unwrap_or(Ordering::Equal)
        }

        (DataValue::String(x), DataValue::String(y)) => x.cmp(y),
        (DataValue::Boolean(x), DataValue::Boolean(y)) => x.cmp(y),
        (DataValue::DateTime(x), DataValue::DateTime(y)) => x.cmp(y),

        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &DataValue) -> u8 {
    match value {
        DataValue::Null => 0,
        DataValue::Boolean(_) => 1,
        DataValue::Integer(_) | DataValue::Float(_) => 2,
        DataValue::String(_) => 3,
        DataValue::DateTime(_) => 4,
    }
}

/// Same order lifted over absent cells (short rows), which sort first
pub fn compare_optional_datavalues(a: Option<&DataValue>, b: Option<&DataValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_datavalues(a, b),
    }
}
