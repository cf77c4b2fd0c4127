/// Colour used for categories missing from the palette.
pub const FALLBACK_COLOUR: u32 = 0xff00ff;

pub struct CategoryInfo {
    pub name: &'static str,
    pub colour: u32,
}

pub const CATEGORY_MAP: &[CategoryInfo] = &[
    CategoryInfo {
        name: "Administrativo",
        colour: 0xff00ff,
    },
    CategoryInfo {
        name: "Civil",
        colour: 0x00ff00,
    },
    CategoryInfo {
        name: "Comercial",
        colour: 0x00ffff,
    },
    CategoryInfo {
        name: "Constitucional",
        colour: 0x8a2be2,
    },
    CategoryInfo {
        name: "Int. Privado",
        colour: 0xff1493,
    },
    CategoryInfo {
        name: "Int. Público",
        colour: 0xba55d3,
    },
    CategoryInfo {
        name: "Laboral",
        colour: 0xffff00,
    },
    CategoryInfo {
        name: "Penal",
        colour: 0xff4500,
    },
    CategoryInfo {
        name: "Procesal",
        colour: 0xff8c00,
    },
    CategoryInfo {
        name: "Derechos Humanos",
        colour: 0xccff00,
    },
    CategoryInfo {
        name: "Filosofía y Teoría del Derecho",
        colour: 0xb2b2ff,
    },
    CategoryInfo {
        name: "Habilidades y Estrategias",
        colour: 0xff007f,
    },
];

pub fn get_category_colour(name: &str) -> u32 {
    CATEGORY_MAP
        .iter()
        .find(|c| c.name == name)
        .map_or(FALLBACK_COLOUR, |c| c.colour)
}

/// Split a packed `0xRRGGBB` colour into sRGB `[r, g, b]` in 0..=1.
pub fn colour_components(colour: u32) -> [f32; 3] {
    [
        ((colour >> 16) & 0xff) as f32 / 255.0,
        ((colour >> 8) & 0xff) as f32 / 255.0,
        (colour & 0xff) as f32 / 255.0,
    ]
}
