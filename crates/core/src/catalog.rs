//! Fixed in-memory product catalog: the showroom bikes and the dealership
//! branches. Loaded once at process start, never mutated at runtime.

use crate::domain::bike::{Bike, BikeId};
use crate::domain::location::Location;

#[derive(Debug, Clone, Copy)]
struct BikeSeed {
    slug: &'static str,
    /// Basename for the image and 3D-model files; not always the slug.
    asset: &'static str,
    brand: &'static str,
    model: &'static str,
    full_name: &'static str,
    cc: u32,
    horsepower: f64,
    torque: f64,
    weight: u32,
    top_speed: u32,
    zero_to_hundred: f64,
    price: u32,
    category: &'static str,
    description: &'static str,
}

const BIKE_SEEDS: &[BikeSeed] = &[
    BikeSeed {
        slug: "yamaha-r1",
        asset: "yamaha-r1",
        brand: "Yamaha",
        model: "R1",
        full_name: "Yamaha YZF-R1",
        cc: 998,
        horsepower: 200.0,
        torque: 112.4,
        weight: 199,
        top_speed: 299,
        zero_to_hundred: 3.0,
        price: 17_999,
        category: "Superbike",
        description: "Pure racing DNA in a street-legal package with MotoGP-derived technology.",
    },
    BikeSeed {
        slug: "yamaha-r15M",
        asset: "yamaha-r15",
        brand: "Yamaha",
        model: "R15",
        full_name: "Yamaha YZF-R15M",
        cc: 155,
        horsepower: 18.6,
        torque: 14.1,
        weight: 142,
        top_speed: 136,
        zero_to_hundred: 8.5,
        price: 3_299,
        category: "Sport",
        description: "Lightweight supersport with aggressive styling and nimble handling.",
    },
    BikeSeed {
        slug: "kawasaki-zx10r",
        asset: "kawasaki-zx10r",
        brand: "Kawasaki",
        model: "ZX-10R",
        full_name: "Kawasaki Ninja ZX-10R",
        cc: 998,
        horsepower: 203.0,
        torque: 114.9,
        weight: 207,
        top_speed: 299,
        zero_to_hundred: 2.9,
        price: 16_999,
        category: "Superbike",
        description: "Championship-winning superbike with electronic rider aids and brutal power.",
    },
    BikeSeed {
        slug: "kawasaki-ninja-400",
        asset: "kawasaki-ninja-400",
        brand: "Kawasaki",
        model: "Ninja 400",
        full_name: "Kawasaki Ninja 400",
        cc: 399,
        horsepower: 45.0,
        torque: 38.0,
        weight: 168,
        top_speed: 179,
        zero_to_hundred: 4.9,
        price: 5_299,
        category: "Sport",
        description: "Perfect blend of performance and accessibility for spirited riding.",
    },
    BikeSeed {
        slug: "kawasaki-h2",
        asset: "kawasaki-h2",
        brand: "Kawasaki",
        model: "H2",
        full_name: "Kawasaki Ninja H2",
        cc: 998,
        horsepower: 228.0,
        torque: 141.7,
        weight: 238,
        top_speed: 337,
        zero_to_hundred: 2.6,
        price: 29_000,
        category: "Hyperbike",
        description: "Supercharged hyperbike pushing the boundaries of street-legal performance.",
    },
    BikeSeed {
        slug: "bmw-s1000rr",
        asset: "bmw-s1000rr",
        brand: "BMW",
        model: "S1000RR",
        full_name: "BMW S1000RR",
        cc: 999,
        horsepower: 205.0,
        torque: 113.0,
        weight: 197,
        top_speed: 303,
        zero_to_hundred: 3.1,
        price: 17_995,
        category: "Superbike",
        description: "German precision engineering meets track-focused performance.",
    },
    BikeSeed {
        slug: "honda-cbr650r",
        asset: "honda-cbr650r",
        brand: "Honda",
        model: "CBR650R",
        full_name: "Honda CBR650R",
        cc: 649,
        horsepower: 95.0,
        torque: 64.0,
        weight: 208,
        top_speed: 220,
        zero_to_hundred: 4.2,
        price: 9_499,
        category: "Sport",
        description: "Refined inline-four engine with everyday usability and sporty character.",
    },
    BikeSeed {
        slug: "honda-cbr1000rr",
        asset: "honda-cbr1000rr",
        brand: "Honda",
        model: "CBR1000RR",
        full_name: "Honda CBR1000RR Fireblade",
        cc: 999,
        horsepower: 189.0,
        torque: 113.0,
        weight: 196,
        top_speed: 299,
        zero_to_hundred: 3.0,
        price: 16_499,
        category: "Superbike",
        description: "Legendary Fireblade with Total Control technology for ultimate performance.",
    },
    BikeSeed {
        slug: "ducati-panigale-v4",
        asset: "ducati-panigale-v4",
        brand: "Ducati",
        model: "Panigale V4",
        full_name: "Ducati Panigale V4",
        cc: 1103,
        horsepower: 214.0,
        torque: 124.0,
        weight: 198,
        top_speed: 305,
        zero_to_hundred: 2.9,
        price: 28_395,
        category: "Superbike",
        description: "Italian masterpiece with MotoGP-derived V4 engine and stunning design.",
    },
    BikeSeed {
        slug: "ducati-panigale-v2",
        asset: "ducati-panigale-v2",
        brand: "Ducati",
        model: "Panigale V2",
        full_name: "Ducati Panigale V2",
        cc: 955,
        horsepower: 155.0,
        torque: 104.0,
        weight: 200,
        top_speed: 270,
        zero_to_hundred: 3.4,
        price: 16_495,
        category: "Superbike",
        description: "Perfect balance of power and handling with signature Ducati passion.",
    },
];

#[derive(Debug, Clone, Copy)]
struct BranchSeed {
    id: &'static str,
    name: &'static str,
    address: &'static str,
    latitude: f64,
    longitude: f64,
    phone: &'static str,
}

const BRANCH_SEEDS: &[BranchSeed] = &[
    BranchSeed {
        id: "downtown",
        name: "BigBike Downtown Showroom",
        address: "123 Main Street, City Center",
        latitude: 13.7563,
        longitude: 100.5018,
        phone: "+1 (555) 123-4567",
    },
    BranchSeed {
        id: "west",
        name: "BigBike West Branch",
        address: "456 West Avenue, West District",
        latitude: 13.7463,
        longitude: 100.4918,
        phone: "+1 (555) 234-5678",
    },
    BranchSeed {
        id: "east",
        name: "BigBike East Outlet",
        address: "789 East Road, East Quarter",
        latitude: 13.7663,
        longitude: 100.5118,
        phone: "+1 (555) 345-6789",
    },
];

impl BikeSeed {
    fn materialize(&self) -> Bike {
        Bike {
            slug: BikeId::new(self.slug),
            brand: self.brand.to_string(),
            model: self.model.to_string(),
            full_name: self.full_name.to_string(),
            cc: self.cc,
            horsepower: self.horsepower,
            torque: self.torque,
            weight: self.weight,
            top_speed: self.top_speed,
            zero_to_hundred: self.zero_to_hundred,
            price: self.price,
            image: format!("/images/{}.jpg", self.asset),
            image_lite: format!("/images/{}-lite.jpg", self.asset),
            model_3d: format!("/models/{}.glb", self.asset),
            category: self.category.to_string(),
            description: self.description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    bikes: Vec<Bike>,
}

impl Catalog {
    pub fn new(bikes: Vec<Bike>) -> Self {
        Self { bikes }
    }

    /// The production showroom catalog.
    pub fn builtin() -> Self {
        Self::new(BIKE_SEEDS.iter().map(BikeSeed::materialize).collect())
    }

    /// Not-found is a valid empty result for callers, never a fault.
    pub fn find(&self, slug: &BikeId) -> Option<&Bike> {
        self.bikes.iter().find(|bike| &bike.slug == slug)
    }

    pub fn by_brand(&self, brand: &str) -> Vec<&Bike> {
        self.bikes.iter().filter(|bike| bike.brand.eq_ignore_ascii_case(brand)).collect()
    }

    /// Distinct brand names in first-seen catalog order.
    pub fn brands(&self) -> Vec<String> {
        let mut brands: Vec<String> = Vec::new();
        for bike in &self.bikes {
            if !brands.iter().any(|known| known == &bike.brand) {
                brands.push(bike.brand.clone());
            }
        }
        brands
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bike> {
        self.bikes.iter()
    }

    pub fn len(&self) -> usize {
        self.bikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bikes.is_empty()
    }
}

/// Fixed dealership branch list. Never empty.
pub fn branches() -> Vec<Location> {
    BRANCH_SEEDS
        .iter()
        .map(|seed| Location {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            address: seed.address.to_string(),
            latitude: seed.latitude,
            longitude: seed.longitude,
            phone: seed.phone.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{branches, Catalog};
    use crate::domain::bike::BikeId;

    #[test]
    fn every_catalog_slug_resolves_to_itself() {
        let catalog = Catalog::builtin();
        for bike in catalog.iter() {
            let found = catalog.find(&bike.slug).expect("slug should resolve");
            assert_eq!(found, bike);
        }
    }

    #[test]
    fn unknown_slug_is_a_valid_absent_result() {
        let catalog = Catalog::builtin();
        assert!(catalog.find(&BikeId::new("vespa-px")).is_none());
    }

    #[test]
    fn slugs_are_unique() {
        let catalog = Catalog::builtin();
        let mut slugs: Vec<_> = catalog.iter().map(|bike| bike.slug.clone()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), catalog.len());
    }

    #[test]
    fn brands_are_distinct_and_in_catalog_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.brands(), vec!["Yamaha", "Kawasaki", "BMW", "Honda", "Ducati"]);
    }

    #[test]
    fn by_brand_preserves_catalog_order() {
        let catalog = Catalog::builtin();
        let kawasakis: Vec<_> =
            catalog.by_brand("Kawasaki").iter().map(|bike| bike.slug.as_str().to_string()).collect();
        assert_eq!(kawasakis, vec!["kawasaki-zx10r", "kawasaki-ninja-400", "kawasaki-h2"]);
    }

    #[test]
    fn asset_paths_follow_the_asset_basename_not_the_slug() {
        let catalog = Catalog::builtin();
        let r15 = catalog.find(&BikeId::new("yamaha-r15M")).expect("r15M");
        assert_eq!(r15.image, "/images/yamaha-r15.jpg");
        assert_eq!(r15.image_lite, "/images/yamaha-r15-lite.jpg");
        assert_eq!(r15.model_3d, "/models/yamaha-r15.glb");

        let r1 = catalog.find(&BikeId::new("yamaha-r1")).expect("r1");
        assert_eq!(r1.image, "/images/yamaha-r1.jpg");
    }

    #[test]
    fn branch_list_is_fixed_and_non_empty() {
        let all = branches();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, "downtown");
    }
}
