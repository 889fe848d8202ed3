//! First-run sample data

use radar_common::model::{
    Dimension, RadarChart, ScoreMap, SubDimension, SymbolType, Vendor,
};
use uuid::Uuid;

/// Default series colors, assigned round-robin to new vendors
pub const DEFAULT_COLORS: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
];

/// Default marker cycle for new vendors
pub const DEFAULT_SYMBOLS: [SymbolType; 4] = [
    SymbolType::Circle,
    SymbolType::Rect,
    SymbolType::Triangle,
    SymbolType::Diamond,
];

fn vendor(name: &str, order: i64) -> Vendor {
    Vendor {
        id: Uuid::new_v4(),
        name: name.to_string(),
        color: DEFAULT_COLORS[order as usize % DEFAULT_COLORS.len()].to_string(),
        symbol: DEFAULT_SYMBOLS[order as usize % DEFAULT_SYMBOLS.len()],
        order,
    }
}

/// Build the sample chart persisted when storage holds no charts yet
pub fn sample_chart() -> RadarChart {
    let mut chart = RadarChart::new("Sample Radar Chart");

    let omada = vendor("Omada", 0);
    let competitor = vendor("Competitor A", 1);
    let scores = |a: f64, b: f64| ScoreMap::from([(omada.id, a), (competitor.id, b)]);

    chart.dimensions = vec![
        Dimension {
            id: Uuid::new_v4(),
            name: "Product Features".to_string(),
            description: Some("Feature completeness and innovation".to_string()),
            weight: 30.0,
            order: 0,
            scores: scores(8.0, 7.0),
            sub_dimensions: vec![
                SubDimension {
                    id: Uuid::new_v4(),
                    name: "Core Functionality".to_string(),
                    description: Some("Coverage of the core workflows".to_string()),
                    weight: 50.0,
                    order: 0,
                    scores: scores(9.0, 7.0),
                },
                SubDimension {
                    id: Uuid::new_v4(),
                    name: "Innovation".to_string(),
                    description: Some("Differentiating capabilities".to_string()),
                    weight: 30.0,
                    order: 1,
                    scores: scores(8.0, 6.0),
                },
                SubDimension {
                    id: Uuid::new_v4(),
                    name: "Extensibility".to_string(),
                    description: Some("Integration and extension options".to_string()),
                    weight: 20.0,
                    order: 2,
                    scores: scores(7.0, 8.0),
                },
            ],
        },
        Dimension {
            id: Uuid::new_v4(),
            name: "Performance".to_string(),
            description: Some("System performance and responsiveness".to_string()),
            weight: 25.0,
            order: 1,
            scores: scores(9.0, 8.0),
            sub_dimensions: Vec::new(),
        },
        Dimension {
            id: Uuid::new_v4(),
            name: "User Experience".to_string(),
            description: Some("Interface quality and interaction design".to_string()),
            weight: 20.0,
            order: 2,
            scores: scores(8.0, 7.0),
            sub_dimensions: Vec::new(),
        },
        Dimension {
            id: Uuid::new_v4(),
            name: "Security".to_string(),
            description: Some("Security posture and compliance".to_string()),
            weight: 15.0,
            order: 3,
            scores: scores(9.0, 9.0),
            sub_dimensions: Vec::new(),
        },
        Dimension {
            id: Uuid::new_v4(),
            name: "Support & Documentation".to_string(),
            description: Some("Support quality and documentation depth".to_string()),
            weight: 10.0,
            order: 4,
            scores: scores(7.0, 6.0),
            sub_dimensions: Vec::new(),
        },
    ];
    chart.vendors = vec![omada, competitor];

    chart
}
