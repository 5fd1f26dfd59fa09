//! Identity normalization: deriving a canonical slug id from a component's
//! identifying attributes.

/// Collapse `raw` into a slug: lowercase, every run of non-`[a-z0-9]`
/// characters becomes a single `-`, leading/trailing separators stripped.
pub fn slug(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for c in raw.chars() {
    let c = c.to_ascii_lowercase();
    if c.is_ascii_alphanumeric() {
      out.push(c);
    } else if !out.is_empty() && !out.ends_with('-') {
      out.push('-');
    }
  }
  while out.ends_with('-') {
    out.pop();
  }
  out
}

/// Derive a canonical component id from an ordered list of identity fields
/// (e.g. `[brand, name, model]` — the ordering varies by seeding context).
///
/// Null and empty fields are dropped; the survivors are joined and slugged.
/// Returns `None` when no identity can be derived — callers must skip such
/// records rather than write an empty key.
pub fn component_id<'a, I>(fields: I) -> Option<String>
where
  I: IntoIterator<Item = Option<&'a str>>,
{
  let joined = fields
    .into_iter()
    .flatten()
    .filter(|f| !f.trim().is_empty())
    .collect::<Vec<_>>()
    .join(" ");

  let id = slug(&joined);
  if id.is_empty() { None } else { Some(id) }
}
