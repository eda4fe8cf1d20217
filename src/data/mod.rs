//! Representation and I/O of known and predicted targets.

pub mod known;
pub mod predicted;

/// Mapping from miRNA identifier to the set of its target gene identifiers.
pub type TargetMap = rustc_hash::FxHashMap<String, rustc_hash::FxHashSet<String>>;

/// Add `gene` to the targets of `mirna`, creating the set if necessary.
pub fn add_target(map: &mut TargetMap, mirna: &str, gene: &str) {
    map.entry(mirna.to_string())
        .or_default()
        .insert(gene.to_string());
}

/// Return the targets of `mirna` as a sorted vector, empty if there are none.
#[cfg(test)]
pub fn sorted_targets<'a>(map: &'a TargetMap, mirna: &str) -> Vec<&'a str> {
    let mut result = map
        .get(mirna)
        .map(|genes| genes.iter().map(String::as_str).collect::<Vec<_>>())
        .unwrap_or_default();
    result.sort_unstable();
    result
}
