use bigbike_core::{BikeId, Catalog};

use crate::commands::CommandResult;

pub fn run(slug: &str) -> CommandResult {
    let catalog = Catalog::builtin();
    let Some(bike) = catalog.find(&BikeId::new(slug)) else {
        return CommandResult::failure(
            "show",
            "not_found",
            format!("unknown bike `{slug}` (try `bigbike catalog` for the full list)"),
            3,
        );
    };

    let lines = [
        format!("{} ({})", bike.full_name, bike.category),
        format!("  displacement: {}cc", bike.cc),
        format!("  power:        {}hp", bike.horsepower),
        format!("  torque:       {}Nm", bike.torque),
        format!("  weight:       {}kg", bike.weight),
        format!("  top speed:    {}km/h", bike.top_speed),
        format!("  0-100:        {}s", bike.zero_to_hundred),
        format!("  price:        ${}", bike.price),
        format!("  {}", bike.description),
    ];

    CommandResult::success("show", lines.join("\n"))
}
