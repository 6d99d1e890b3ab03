//! JSON form of decoded records.
//!
//! A file becomes an array of objects, one per row, keyed by column name in
//! column order. Text is a string, a reference list an array, an absent
//! scalar `null`, and an integer a number. Integers above `u64::MAX` (only
//! possible in 16-byte foreignrow slots) are written as decimal strings,
//! since JSON numbers that large do not survive most parsers.
//!
//! Reading goes the other way and needs the table: whether a JSON string is
//! text or a big integer depends on the column it lands in.

use serde_json::{Map, Value};
use datkit_base::{err, ErrorKind, Result};
use datkit_codec::{Field, Record};
use datkit_schema::{Column, ColumnType, TableSchema};

fn json_err(msg: String) -> datkit_base::Error {
    err(ErrorKind::Json(msg))
}

fn int_to_json(v: u128) -> Value {
    match u64::try_from(v) {
        Ok(small) => Value::from(small),
        Err(_) => Value::String(v.to_string()),
    }
}

pub fn field_to_json(field: &Field) -> Value {
    match field {
        Field::Text(s) => Value::String(s.clone()),
        Field::Refs(refs) => Value::Array(refs.iter().map(|r| int_to_json(*r)).collect()),
        Field::Int(v) => int_to_json(*v),
        Field::Absent => Value::Null,
    }
}

pub fn record_to_json(record: &Record) -> Value {
    let mut obj = Map::with_capacity(record.len());
    for (name, field) in record.iter() {
        obj.insert(name.to_string(), field_to_json(field));
    }
    Value::Object(obj)
}

pub fn records_to_json(records: &[Record]) -> Value {
    Value::Array(records.iter().map(record_to_json).collect())
}

pub fn to_string_pretty(records: &[Record]) -> Result<String> {
    serde_json::to_string_pretty(&records_to_json(records)).map_err(|e| json_err(e.to_string()))
}

fn int_from_json(name: &str, v: &Value) -> Result<u128> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| json_err(format!("column {:?}: {} is not an unsigned integer", name, n))),
        Value::String(s) => s
            .parse()
            .map_err(|_| json_err(format!("column {:?}: {:?} is not an unsigned integer", name, s))),
        Value::Bool(b) => Ok(u128::from(*b)),
        other => Err(json_err(format!("column {:?}: expected an integer, found {}", name, other))),
    }
}

// `column` is None for keys the table does not have; those are converted by
// shape alone and left for the encoder to reject.
fn field_from_json(name: &str, column: Option<&Column>, v: &Value) -> Result<Field> {
    let is_text = column.map_or(matches!(v, Value::String(_)), |c| c.ty == ColumnType::String);
    match v {
        Value::Null => Ok(Field::Absent),
        Value::String(s) if is_text => Ok(Field::Text(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| int_from_json(name, item))
            .collect::<Result<Vec<u128>>>()
            .map(Field::Refs),
        other => int_from_json(name, other).map(Field::Int),
    }
}

pub fn record_from_json(v: &Value, table: &TableSchema) -> Result<Record> {
    let Value::Object(obj) = v else {
        return Err(json_err(format!("expected an object per row, found {}", v)));
    };
    let mut rec = Record::with_capacity(obj.len());
    for (name, value) in obj {
        let column = table.columns().iter().find(|c| c.name == *name);
        rec.push(name.as_str(), field_from_json(name, column, value)?);
    }
    Ok(rec)
}

pub fn records_from_json(v: &Value, table: &TableSchema) -> Result<Vec<Record>> {
    let Value::Array(rows) = v else {
        return Err(json_err("expected an array of rows".to_string()));
    };
    rows.iter().map(|row| record_from_json(row, table)).collect()
}

pub fn from_str(text: &str, table: &TableSchema) -> Result<Vec<Record>> {
    let v: Value = serde_json::from_str(text).map_err(|e| json_err(e.to_string()))?;
    records_from_json(&v, table)
}
