//! Variable tree rendering
//!
//! Serializes one variable into a depth-bounded textual tree. The depth
//! budget is the *only* recursion bound: there is no cycle detection, so a
//! self-referential structure is limited strictly by the depth counter, and
//! output can grow with (branching factor)^depth. Callers are expected to
//! pass small depth values.

use std::fmt::{self, Write};
use std::net::{Ipv4Addr, Ipv6Addr};

use coresift_shared::types::variable::Variable;

/// Display type under which a raw byte sequence conventionally carries a
/// network address.
const NET_ADDR_TYPE: &str = "net.IP";

/// Render `var` and its children to `out`.
///
/// Each structural level extends `prefix` by one `indent` unit, so nesting is
/// proportional to structural depth, not element count. A depth budget of
/// zero (or less) renders nothing at all.
pub fn render_variable(
    out: &mut impl Write,
    var: &Variable,
    prefix: &str,
    indent: &str,
    depth: i64,
) -> fmt::Result {
    if depth <= 0 {
        return Ok(());
    }

    let mut value = var.value.clone().unwrap_or_default();
    let mut skip_children = false;
    if let Some(addr) = net_addr_value(var) {
        // The byte children are consumed by the address text, not printed.
        value = addr;
        skip_children = true;
    }

    writeln!(
        out,
        "{} {}: {} ({}) {}",
        prefix, var.name, value, var.type_name, var.kind
    )?;

    if !skip_children {
        let child_prefix = format!("{prefix}{indent}");
        for child in &var.children {
            render_variable(out, child, &child_prefix, indent, depth - 1)?;
        }
    }
    Ok(())
}

/// Canonical text for a raw network-address byte sequence, when `var` is one.
///
/// Requires the conventional display type and children that all parse as
/// bytes, 4 (IPv4) or 16 (IPv6) of them; anything else falls back to generic
/// rendering.
fn net_addr_value(var: &Variable) -> Option<String> {
    if var.type_name != NET_ADDR_TYPE {
        return None;
    }
    let bytes = var
        .children
        .iter()
        .map(|c| c.value.as_deref()?.parse::<u8>().ok())
        .collect::<Option<Vec<u8>>>()?;
    match bytes.len() {
        4 => Some(Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]).to_string()),
        16 => {
            let mut raw = [0u8; 16];
            raw.copy_from_slice(&bytes);
            Some(Ipv6Addr::from(raw).to_string())
        }
        _ => None,
    }
}
