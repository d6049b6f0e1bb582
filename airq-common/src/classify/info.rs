//! Reference descriptions shown on pollutant detail pages

use serde::Serialize;

use super::PollutantKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PollutantInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub sources: &'static str,
    pub health_effects: &'static str,
    pub unit: &'static str,
    pub icon: &'static str,
}

impl PollutantKind {
    pub fn info(&self) -> PollutantInfo {
        let unit = self.unit();
        match self {
            PollutantKind::Pm25 => PollutantInfo {
                name: "Particulate Matter (PM2.5)",
                description: "Fine particles with diameter less than 2.5 micrometers",
                sources: "Vehicle emissions, industrial processes, wildfires",
                health_effects: "Can penetrate deep into lungs, causing respiratory and cardiovascular issues",
                unit,
                icon: "🌫️",
            },
            PollutantKind::Pm10 => PollutantInfo {
                name: "Particulate Matter (PM10)",
                description: "Coarse particles with diameter less than 10 micrometers",
                sources: "Dust, construction, agriculture, vehicle emissions",
                health_effects: "Can irritate eyes, nose, and throat",
                unit,
                icon: "🌫️",
            },
            PollutantKind::No2 => PollutantInfo {
                name: "Nitrogen Dioxide (NO₂)",
                description: "A reddish-brown gas with a sharp, biting odor",
                sources: "Vehicle emissions, power plants, industrial facilities",
                health_effects: "Can cause respiratory problems and reduce lung function",
                unit,
                icon: "🚗",
            },
            PollutantKind::O3 => PollutantInfo {
                name: "Ozone (O₃)",
                description: "A gas formed when pollutants react in sunlight",
                sources: "Vehicle emissions, industrial processes, sunlight",
                health_effects: "Can cause breathing problems and aggravate asthma",
                unit,
                icon: "☀️",
            },
            PollutantKind::Co => PollutantInfo {
                name: "Carbon Monoxide (CO)",
                description: "A colorless, odorless gas produced by incomplete combustion",
                sources: "Vehicle emissions, industrial processes, wildfires",
                health_effects: "Reduces oxygen delivery to body tissues",
                unit,
                icon: "🔥",
            },
            PollutantKind::So2 => PollutantInfo {
                name: "Sulfur Dioxide (SO₂)",
                description: "A colorless gas with a pungent odor",
                sources: "Power plants, industrial facilities, volcanoes",
                health_effects: "Can cause respiratory problems and acid rain",
                unit,
                icon: "🏭",
            },
        }
    }
}
