//! Static planet catalog.
//!
//! One [`CelestialBody`] per rendered body, ordered by distance from the
//! origin.  The star is an ordinary entry distinguished only by its id
//! ([`STAR_ID`]); it has no orbit guide and uses unlit materials.
//!
//! Placement is static: bodies sit on the +X axis at `distance` and only spin
//! in place.  `orbit_speed` is carried for completeness but nothing consumes it.

use crate::error::{SceneError, SceneResult};
use bevy::prelude::*;
use std::collections::HashSet;

/// Id of the single catalog entry that represents the central star.
pub const STAR_ID: &str = "sun";

/// Descriptive facts shown in the information panel.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyFacts {
    pub diameter: &'static str,
    pub distance: &'static str,
    pub atmosphere: &'static str,
    pub temperature: &'static str,
    pub mass: &'static str,
    pub orbit_period: &'static str,
    pub moons: u32,
    pub fun_fact: &'static str,
    pub physical_characteristics: &'static str,
    pub exploration_missions: &'static str,
}

/// One star or planet.  Immutable after startup.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub id: &'static str,
    pub name: &'static str,
    /// Surface texture path, relative to the asset root.
    pub texture: &'static str,
    /// Optional cloud layer texture.
    pub cloud_texture: Option<&'static str>,
    /// Optional ring texture; rings fall back to a flat tint without one.
    pub ring_texture: Option<&'static str>,
    /// Fallback colour (sRGB bytes), also used for the info-panel swatch.
    pub color: [u8; 3],
    /// Sphere radius in scene units.
    pub radius: f32,
    /// Distance from the origin along +X.
    pub distance: f32,
    /// Self-rotation in radians per rendered frame.
    pub rotation_speed: f32,
    /// Declared orbital rate.  Not simulated.
    pub orbit_speed: f32,
    pub has_rings: bool,
    pub description: &'static str,
    pub facts: BodyFacts,
}

impl CelestialBody {
    /// `true` for the central star.
    pub fn is_star(&self) -> bool {
        self.id == STAR_ID
    }

    /// Fallback colour as a Bevy [`Color`].
    pub fn fallback_color(&self) -> Color {
        let [r, g, b] = self.color;
        Color::srgb_u8(r, g, b)
    }

    /// Every texture path this body needs, surface first.
    pub fn texture_paths(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.texture)
            .chain(self.cloud_texture)
            .chain(self.ring_texture)
    }
}

/// The loaded catalog.  Inserted once at startup.
#[derive(Resource, Debug, Clone)]
pub struct Catalog {
    bodies: Vec<CelestialBody>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(solar_system())
    }
}

impl Catalog {
    pub fn new(bodies: Vec<CelestialBody>) -> Self {
        Self { bodies }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Look up a body by id.
    pub fn get(&self, id: &str) -> SceneResult<&CelestialBody> {
        self.bodies
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| SceneError::UnknownBody { id: id.to_string() })
    }

    pub fn star(&self) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.is_star())
    }

    /// Check id uniqueness and that exactly one star is present.
    ///
    /// The built-in catalog is trusted; this only exists so a hand-edited
    /// catalog produces a clear log line instead of odd rendering.
    pub fn validate(&self) -> SceneResult<()> {
        let mut seen = HashSet::new();
        for body in &self.bodies {
            if !seen.insert(body.id) {
                return Err(SceneError::InvalidCatalog {
                    reason: format!("duplicate id '{}'", body.id),
                });
            }
        }
        let stars = self.bodies.iter().filter(|b| b.is_star()).count();
        if stars != 1 {
            return Err(SceneError::InvalidCatalog {
                reason: format!("expected exactly one '{STAR_ID}' entry, found {stars}"),
            });
        }
        Ok(())
    }
}

/// Startup system: log catalog problems without aborting.
pub fn validate_catalog(catalog: Res<Catalog>) {
    match catalog.validate() {
        Ok(()) => info!("[setup] Catalog ready: {} bodies", catalog.len()),
        Err(e) => warn!("[setup] {e}"),
    }
}

// ── Built-in data ─────────────────────────────────────────────────────────────

/// The star plus the eight planets, nearest first.
pub fn solar_system() -> Vec<CelestialBody> {
    vec![
        CelestialBody {
            id: STAR_ID,
            name: "Sun",
            texture: "textures/sun.jpg",
            cloud_texture: None,
            ring_texture: None,
            color: [0xFD, 0xB8, 0x13],
            radius: 12.0,
            distance: 0.0,
            rotation_speed: 0.001,
            orbit_speed: 0.0,
            has_rings: false,
            description: "The star at the centre of our solar system and the source of life on Earth.",
            facts: BodyFacts {
                diameter: "1,392,700 km",
                distance: "0 km",
                atmosphere: "Hydrogen (74.9%), Helium (23.8%)",
                temperature: "5,505°C (surface), 15 million °C (core)",
                mass: "1.989 × 10^30 kg",
                orbit_period: "225-250 million years (galactic)",
                moons: 0,
                fun_fact: "The Sun holds 99.86% of the total mass of the solar system.",
                physical_characteristics: "A giant ball of plasma with a powerful magnetic field.",
                exploration_missions: "Parker Solar Probe, SOHO, Solar Orbiter",
            },
        },
        CelestialBody {
            id: "mercury",
            name: "Mercury",
            texture: "textures/mercury.jpg",
            cloud_texture: None,
            ring_texture: None,
            color: [0xA5, 0xA5, 0xA5],
            radius: 0.8,
            distance: 25.0,
            rotation_speed: 0.004,
            orbit_speed: 0.04,
            has_rings: false,
            description: "The smallest planet in the solar system and the closest to the Sun.",
            facts: BodyFacts {
                diameter: "4,880 km",
                distance: "57.9 million km",
                atmosphere: "Thin (oxygen, sodium, hydrogen, helium, potassium)",
                temperature: "-173°C to 427°C",
                mass: "3.285 × 10^23 kg",
                orbit_period: "88 Earth days",
                moons: 0,
                fun_fact: "Mercury is slowly shrinking as its massive iron core cools.",
                physical_characteristics: "Cratered, Moon-like surface with a large iron core.",
                exploration_missions: "Mariner 10, MESSENGER, BepiColombo",
            },
        },
        CelestialBody {
            id: "venus",
            name: "Venus",
            texture: "textures/venus.jpg",
            cloud_texture: None,
            ring_texture: None,
            color: [0xE3, 0xBB, 0x76],
            radius: 1.1,
            distance: 35.0,
            rotation_speed: 0.002,
            orbit_speed: 0.015,
            has_rings: false,
            description: "The hottest planet in the solar system, with an extreme greenhouse effect.",
            facts: BodyFacts {
                diameter: "12,104 km",
                distance: "108.2 million km",
                atmosphere: "Thick (96% carbon dioxide, nitrogen)",
                temperature: "462°C (average)",
                mass: "4.867 × 10^24 kg",
                orbit_period: "225 Earth days",
                moons: 0,
                fun_fact: "A day on Venus is longer than its year because it rotates so slowly.",
                physical_characteristics: "Mountains, volcanoes and vast lava plains.",
                exploration_missions: "Venera, Magellan, Venus Express, Akatsuki",
            },
        },
        CelestialBody {
            id: "earth",
            name: "Earth",
            texture: "textures/earth.jpg",
            cloud_texture: Some("textures/earth_clouds.png"),
            ring_texture: None,
            color: [0x22, 0xA6, 0xB3],
            radius: 1.2,
            distance: 50.0,
            rotation_speed: 0.01,
            orbit_speed: 0.01,
            has_rings: false,
            description: "The only planet known to harbour life.",
            facts: BodyFacts {
                diameter: "12,742 km",
                distance: "149.6 million km",
                atmosphere: "Nitrogen (78%), oxygen (21%), argon",
                temperature: "-88°C to 58°C",
                mass: "5.972 × 10^24 kg",
                orbit_period: "365.25 days",
                moons: 1,
                fun_fact: "Earth is the only planet not named after a Greek or Roman deity.",
                physical_characteristics: "70% water, active plate tectonics, protective magnetic field.",
                exploration_missions: "N/A (we live here)",
            },
        },
        CelestialBody {
            id: "mars",
            name: "Mars",
            texture: "textures/mars.jpg",
            cloud_texture: None,
            ring_texture: None,
            color: [0xD3, 0x54, 0x00],
            radius: 0.9,
            distance: 65.0,
            rotation_speed: 0.008,
            orbit_speed: 0.008,
            has_rings: false,
            description: "The Red Planet, prime target for future human exploration.",
            facts: BodyFacts {
                diameter: "6,779 km",
                distance: "227.9 million km",
                atmosphere: "Thin (carbon dioxide, argon, nitrogen)",
                temperature: "-140°C to 20°C",
                mass: "6.39 × 10^23 kg",
                orbit_period: "687 Earth days",
                moons: 2,
                fun_fact: "Home to the tallest mountain in the solar system, Olympus Mons (21 km).",
                physical_characteristics: "Rusty iron-oxide soil, craters and giant canyons.",
                exploration_missions: "Viking, Pathfinder, Spirit, Opportunity, Curiosity, Perseverance",
            },
        },
        CelestialBody {
            id: "jupiter",
            name: "Jupiter",
            texture: "textures/jupiter.jpg",
            cloud_texture: None,
            ring_texture: None,
            color: [0xC0, 0x8B, 0x66],
            radius: 4.5,
            distance: 100.0,
            rotation_speed: 0.04,
            orbit_speed: 0.002,
            has_rings: false,
            description: "A gas giant and the largest planet in the solar system.",
            facts: BodyFacts {
                diameter: "139,820 km",
                distance: "778.5 million km",
                atmosphere: "Hydrogen, helium",
                temperature: "-108°C (cloud tops)",
                mass: "1.898 × 10^27 kg",
                orbit_period: "11.86 Earth years",
                moons: 95,
                fun_fact: "The Great Red Spot is a storm that has raged for hundreds of years.",
                physical_characteristics: "Gas giant with no solid surface and faint rings.",
                exploration_missions: "Pioneer 10/11, Voyager, Galileo, Juno",
            },
        },
        CelestialBody {
            id: "saturn",
            name: "Saturn",
            texture: "textures/saturn.jpg",
            cloud_texture: None,
            ring_texture: Some("textures/saturn_ring.png"),
            color: [0xE4, 0xD5, 0xB6],
            radius: 3.8,
            distance: 140.0,
            rotation_speed: 0.038,
            orbit_speed: 0.0009,
            has_rings: true,
            description: "Famous for its spectacular and intricate ring system.",
            facts: BodyFacts {
                diameter: "116,460 km",
                distance: "1.4 billion km",
                atmosphere: "Hydrogen, helium",
                temperature: "-139°C",
                mass: "5.683 × 10^26 kg",
                orbit_period: "29.45 Earth years",
                moons: 146,
                fun_fact: "Saturn is so light for its size that it would float in a big enough bathtub.",
                physical_characteristics: "Gas giant with broad rings of ice and rock.",
                exploration_missions: "Pioneer 11, Voyager, Cassini-Huygens",
            },
        },
        CelestialBody {
            id: "uranus",
            name: "Uranus",
            texture: "textures/uranus.jpg",
            cloud_texture: None,
            ring_texture: None,
            color: [0x73, 0xD7, 0xEE],
            radius: 2.2,
            distance: 180.0,
            rotation_speed: 0.03,
            orbit_speed: 0.0006,
            has_rings: false,
            description: "An ice giant tilted so far that it practically rolls along its orbit.",
            facts: BodyFacts {
                diameter: "50,724 km",
                distance: "2.9 billion km",
                atmosphere: "Hydrogen, helium, methane",
                temperature: "-197°C",
                mass: "8.681 × 10^25 kg",
                orbit_period: "84 Earth years",
                moons: 27,
                fun_fact: "Water, ammonia and methane ices give its atmosphere a blue-green tint.",
                physical_characteristics: "Ice giant with a 98 degree axial tilt.",
                exploration_missions: "Voyager 2",
            },
        },
        CelestialBody {
            id: "neptune",
            name: "Neptune",
            texture: "textures/neptune.jpg",
            cloud_texture: None,
            ring_texture: None,
            color: [0x18, 0x29, 0x83],
            radius: 2.1,
            distance: 220.0,
            rotation_speed: 0.032,
            orbit_speed: 0.0005,
            has_rings: false,
            description: "The farthest planet from the Sun, known for its supersonic winds.",
            facts: BodyFacts {
                diameter: "49,244 km",
                distance: "4.5 billion km",
                atmosphere: "Hydrogen, helium, methane",
                temperature: "-201°C",
                mass: "1.024 × 10^26 kg",
                orbit_period: "164.8 Earth years",
                moons: 14,
                fun_fact: "Neptune has the fastest winds in the solar system, up to 2,100 km/h.",
                physical_characteristics: "Ice giant with active dark storms and faint rings.",
                exploration_missions: "Voyager 2",
            },
        },
    ]
}
