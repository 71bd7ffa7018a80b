use moneta_core::IndicatorInfo;

fn info(id: &str, label: &str, unit: &str) -> IndicatorInfo {
    IndicatorInfo {
        id: id.to_string(),
        label: Some(label.to_string()),
        description: None,
        source: Some("Mock".to_string()),
        unit: Some(unit.to_string()),
        dataset: Some("MOCK".to_string()),
    }
}

pub fn all() -> Vec<IndicatorInfo> {
    vec![
        info("LUR", "Unemployment rate", "Percent of total labor force"),
        info("NGDPD", "GDP, current prices", "Billions of U.S. dollars"),
        info("PCPIPCH", "Inflation rate, average consumer prices", "Annual percent change"),
    ]
}
