/// Whether `manufacturer` names a DataWedge-capable vendor
///
/// Case-insensitive substring match against `allow_list`.
pub fn is_supported_vendor<S: AsRef<str>>(manufacturer: &str, allow_list: &[S]) -> bool {
    let manufacturer = manufacturer.to_lowercase();
    allow_list
        .iter()
        .map(|vendor| vendor.as_ref().to_lowercase())
        .any(|vendor| !vendor.is_empty() && manufacturer.contains(&vendor))
}
