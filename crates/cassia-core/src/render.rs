use crate::value::Value;

/// Canonical textual form. Deterministic: identical values always render
/// identically, and record rendering never depends on construction order.
/// A compound value reached again while it is still being rendered prints
/// as `<cycle>`.
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, &mut Vec::new());
    out
}

fn write_value(out: &mut String, value: &Value, trail: &mut Vec<usize>) {
    match value {
        Value::Nil => out.push_str("null"),
        Value::Bool(b) => out.push_str(&b.to_string()),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Float(n) => out.push_str(&format_float(*n)),
        Value::Str(s) => out.push_str(s),
        Value::Seq(h) => {
            if entered(out, trail, h.identity()) {
                return;
            }
            write_items(out, &h.items(), trail);
            trail.pop();
        }
        Value::Set(h) => {
            if entered(out, trail, h.identity()) {
                return;
            }
            write_items(out, &h.items(), trail);
            trail.pop();
        }
        Value::Record(h) => {
            if entered(out, trail, h.identity()) {
                return;
            }
            out.push('{');
            // BTreeMap iteration is already key-sorted.
            for (idx, (key, item)) in h.fields().iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                out.push_str(key);
                out.push(':');
                write_value(out, item, trail);
            }
            out.push('}');
            trail.pop();
        }
        Value::Map(h) => {
            if entered(out, trail, h.identity()) {
                return;
            }
            out.push('{');
            for (idx, (key, item)) in h.entries().iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                write_value(out, key, trail);
                out.push('=');
                write_value(out, item, trail);
            }
            out.push('}');
            trail.pop();
        }
    }
}

// True when the value is already on the render path; emits the marker and
// leaves the trail untouched.
fn entered(out: &mut String, trail: &mut Vec<usize>, identity: usize) -> bool {
    if trail.contains(&identity) {
        out.push_str("<cycle>");
        return true;
    }
    trail.push(identity);
    false
}

fn write_items(out: &mut String, items: &[Value], trail: &mut Vec<usize>) {
    out.push('[');
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        write_value(out, item, trail);
    }
    out.push(']');
}

fn format_float(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{:.1}", n)
    } else {
        n.to_string()
    }
}
