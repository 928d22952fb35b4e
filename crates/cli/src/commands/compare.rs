use bigbike_core::{compare, BikeId, Catalog, Winner};

use crate::commands::CommandResult;

pub fn run(left: &str, right: &str) -> CommandResult {
    let catalog = Catalog::builtin();

    let mut bikes = Vec::with_capacity(2);
    for slug in [left, right] {
        match catalog.find(&BikeId::new(slug)) {
            Some(bike) => bikes.push(bike),
            None => {
                return CommandResult::failure(
                    "compare",
                    "not_found",
                    format!("unknown bike `{slug}`"),
                    3,
                )
            }
        }
    }

    let mut lines = vec![format!("{} vs {}", bikes[0].full_name, bikes[1].full_name)];
    for row in compare(bikes[0], bikes[1]) {
        // The asterisk marks the better value on rows where one exists.
        let (left_mark, right_mark) = match row.winner {
            Winner::First => ("*", " "),
            Winner::Second => (" ", "*"),
            Winner::None => (" ", " "),
        };
        let left_value = format!("{}{}", left_mark, row.left);
        lines.push(format!(
            "  {:<14} {:<26} {}{}",
            row.label, left_value, right_mark, row.right
        ));
    }

    CommandResult::success("compare", lines.join("\n"))
}
