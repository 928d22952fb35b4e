use bigbike_core::{filter_sort, BrandFilter, Catalog, SortKey};

use crate::commands::CommandResult;

pub fn run(q: Option<&str>, brand: Option<&str>, sort: Option<&str>) -> CommandResult {
    let sort_key = match sort {
        Some(raw) => match raw.parse::<SortKey>() {
            Ok(key) => key,
            Err(error) => return CommandResult::failure("catalog", "usage", error, 2),
        },
        None => SortKey::default(),
    };
    let brand_filter = match brand {
        Some(brand) => BrandFilter::Only(brand.to_string()),
        None => BrandFilter::Any,
    };

    let catalog = Catalog::builtin();
    let bikes = filter_sort(&catalog, q.unwrap_or(""), &brand_filter, sort_key);

    let mut lines = vec![format!("{} of {} bikes", bikes.len(), catalog.len())];
    for bike in &bikes {
        lines.push(format!(
            "  {:<22} {:<22} {:>5}cc {:>6.0}hp ${}",
            bike.slug, bike.full_name, bike.cc, bike.horsepower, bike.price
        ));
    }

    CommandResult::success("catalog", lines.join("\n"))
}
