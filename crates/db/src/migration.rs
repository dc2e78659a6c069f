/// Schema statements contributed by a module.
///
/// `up` may hold several `;`-separated statements. Migrations are identified
/// by `(module name, id)` and applied at most once per database.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}
