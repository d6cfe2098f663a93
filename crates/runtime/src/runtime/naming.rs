use crate::oracle::CityRegistry;

/// Picks the name of a new city.
///
/// A non-blank supplied name wins. Otherwise the first ruleset name not yet
/// used, then `"City {n}"` with the smallest free `n` above the city count.
pub(crate) fn city_name(supplied: Option<&str>, names: &[String], registry: &CityRegistry) -> String {
    if let Some(name) = supplied.map(str::trim).filter(|name| !name.is_empty()) {
        return name.to_string();
    }
    if let Some(name) = names.iter().find(|name| !registry.is_name_taken(name)) {
        return name.clone();
    }
    let mut n = registry.len() + 1;
    loop {
        let name = format!("City {n}");
        if !registry.is_name_taken(&name) {
            return name;
        }
        n += 1;
    }
}
