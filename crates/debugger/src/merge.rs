//! Deep merge for error records.
//!
//! Objects merge key by key, arrays merge by index, anything else is
//! overwritten. Fields missing from the incoming record keep their previous
//! value.

use serde_json::{map::Entry, Map, Value};
use shared::console::{Message, SourceEntity};

pub fn merge_message(base: &mut Message, incoming: Message) {
    let Message {
        severity,
        text,
        timestamp,
        id,
        log_type,
        source,
        messages,
        state,
        time_taken,
        extra,
    } = incoming;

    base.severity = severity;
    base.text = text;
    overwrite_if_some(&mut base.timestamp, timestamp);
    overwrite_if_some(&mut base.id, id);
    overwrite_if_some(&mut base.log_type, log_type);
    overwrite_if_some(&mut base.time_taken, time_taken);

    if let Some(source) = source {
        match &mut base.source {
            Some(previous) => merge_source(previous, source),
            None => base.source = Some(source),
        }
    }

    merge_array(&mut base.messages, messages);

    if let Some(state) = state {
        merge_object(base.state.get_or_insert_with(Map::new), state);
    }

    merge_object(&mut base.extra, extra);
}

fn merge_source(base: &mut SourceEntity, incoming: SourceEntity) {
    base.entity_type = incoming.entity_type;
    base.id = incoming.id;
    base.name = incoming.name;
    overwrite_if_some(&mut base.property_path, incoming.property_path);
}

/// Typed optional fields read `null` as `None`, so `null` keeps the prior value.
fn overwrite_if_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

pub fn merge_value(base: &mut Value, incoming: Value) {
    match incoming {
        Value::Object(incoming) => {
            if let Value::Object(base) = base {
                merge_object(base, incoming);
            } else {
                *base = Value::Object(incoming);
            }
        }
        Value::Array(incoming) => {
            if let Value::Array(base) = base {
                merge_array(base, incoming);
            } else {
                *base = Value::Array(incoming);
            }
        }
        other => *base = other,
    }
}

fn merge_object(base: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, value) in incoming {
        match base.entry(key) {
            Entry::Occupied(mut slot) => merge_value(slot.get_mut(), value),
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
    }
}

fn merge_array(base: &mut Vec<Value>, incoming: Vec<Value>) {
    for (index, value) in incoming.into_iter().enumerate() {
        match base.get_mut(index) {
            Some(slot) => merge_value(slot, value),
            None => base.push(value),
        }
    }
}
