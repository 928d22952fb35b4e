use bigbike_core::{branches, nearest, Coordinates};

use crate::commands::CommandResult;

pub fn run(latitude: Option<f64>, longitude: Option<f64>) -> CommandResult {
    let locations = branches();

    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        // No position fix: list every branch instead of guessing.
        let mut lines = vec!["no coordinates given, all branches:".to_string()];
        for location in &locations {
            lines.push(format!("  {} - {} ({})", location.name, location.address, location.phone));
        }
        return CommandResult::success("nearest", lines.join("\n"));
    };

    match nearest(Coordinates::new(latitude, longitude), &locations) {
        Some((location, distance_km)) => CommandResult::success(
            "nearest",
            format!(
                "{} - {} ({:.2} km away)\n  call {}",
                location.name, location.address, distance_km, location.phone
            ),
        ),
        None => CommandResult::failure("nearest", "no_branches", "no branches configured", 4),
    }
}
