//! The built-in menu.
//!
//! Shown whenever there is nothing better: no database configured and no local
//! copy, an unreadable local copy, or a database whose `menu_items` table is empty.
//! Also the seed data for the setup SQL and the target of "reset menu".

use crate::models::MenuItem;

/// (id, name, description, price, category, highlight, image)
type Seed = (&'static str, &'static str, &'static str, f64, &'static str, bool, &'static str);

const DEFAULT_MENU: &[Seed] = &[
    (
        "1",
        "Prime Tomahawk Gold",
        "Corte nobre de 800g com osso, finalizado na manteiga de ervas e flor de sal.",
        189.90,
        "carnes",
        true,
        "https://images.unsplash.com/photo-1615937691194-97dbd3f3dc29?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "2",
        "Bife de Chorizo Angus",
        "Suculência extrema, grelhado ao ponto do chef. Acompanha batatas rústicas.",
        89.90,
        "carnes",
        true,
        "https://images.unsplash.com/photo-1558030006-450675393462?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "3",
        "Costela Defumada BBQ",
        "Assada lentamente por 12 horas, desmancha no garfo. Molho barbecue artesanal.",
        75.00,
        "carnes",
        false,
        "https://img.freepik.com/fotos-premium/costelinha-de-porco-estilo-americano-deliciosas-costelinhas-de-porco-defumadas-com-cobertura-de-molho-barbecue-vista-de-cima_946881-13.jpg",
    ),
    (
        "4",
        "Ancho Premium",
        "Corte dianteiro do contrafilé, marmoreio intenso e sabor inigualável.",
        92.00,
        "carnes",
        false,
        "https://images.unsplash.com/photo-1600891964092-4316c288032e?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "5",
        "Gnocchi ao Funghi Trufado",
        "Massa fresca de batata, molho cremoso de cogumelos selvagens e azeite trufado.",
        68.00,
        "massas",
        true,
        "https://images.unsplash.com/photo-1551183053-bf91a1d81141?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "6",
        "Carbonara Autêntica",
        "Sem creme de leite. Gema caipira, pecorino romano, guanciale e pimenta negra.",
        62.00,
        "massas",
        true,
        "https://images.unsplash.com/photo-1588013273468-315fd88ea34c?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "7",
        "Risoto de Camarão",
        "Arroz arbóreo, camarões rosa grandes, limão siciliano e parmesão.",
        79.00,
        "massas",
        false,
        "https://images.unsplash.com/photo-1595295333158-4742f28fbd85?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "8",
        "Lasagna Bolognese",
        "Camadas finas de massa, ragu de carne cozido por 6h e molho bechamel.",
        58.00,
        "massas",
        false,
        "https://images.unsplash.com/photo-1619895092538-128341789043?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "9",
        "Burrata Caprese",
        "Burrata cremosa, tomates confit, pesto de manjericão fresco e torradas.",
        55.00,
        "entradas",
        true,
        "https://images.unsplash.com/photo-1563379926898-05f4575a45d8?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "10",
        "Carpaccio Clássico",
        "Lâminas finíssimas de carne crua, alcaparras, parmesão e mostarda.",
        48.00,
        "entradas",
        false,
        "https://images.unsplash.com/photo-1504674900247-0877df9cc836?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "11",
        "Bruschetta Pomodoro",
        "Pão italiano tostado, tomates frescos, alho e manjericão.",
        32.00,
        "entradas",
        false,
        "https://trattorialapasta.com/cms-data/blog/menu/bruschetta-al-pomodoro/image/bruschetta-al-pomodoro.jpg",
    ),
    (
        "12",
        "Dadinhos de Queijo Coalho",
        "Crocantes por fora, macios por dentro. Acompanha geleia de pimenta.",
        35.00,
        "entradas",
        false,
        "https://images.unsplash.com/photo-1548340748-6d2b7d7da280?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "13",
        "Volcán de Dulce de Leche",
        "Petit gateau de doce de leite argentino com sorvete de baunilha.",
        32.00,
        "sobremesas",
        true,
        "https://images.unsplash.com/photo-1624353365286-3f8d62daad51?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "14",
        "Tiramisu Fuego",
        "A clássica receita italiana com um toque de conhaque.",
        28.00,
        "sobremesas",
        false,
        "https://desxestal.com/wp-content/uploads/2021/04/desxestal_tiramisu-scaled.jpg",
    ),
    (
        "15",
        "Cheesecake de Frutas Vermelhas",
        "Base crocante, creme suave e calda rústica de frutas.",
        29.00,
        "sobremesas",
        false,
        "https://images.unsplash.com/photo-1524351199678-941a58a3df50?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "16",
        "Malbec Reserva",
        "Vinho tinto encorpado, notas de ameixa e baunilha. Safra especial.",
        140.00,
        "vinhos",
        false,
        "https://images.unsplash.com/photo-1510812431401-41d2bd2722f3?auto=format&fit=crop&q=80&w=800",
    ),
    (
        "17",
        "Fuego Signature Drink",
        "Gin, infusão de hibisco, tônica e defumação de alecrim.",
        38.00,
        "vinhos",
        true,
        "https://images.unsplash.com/photo-1556679343-c7306c1976bc?auto=format&fit=crop&q=80&w=800",
    ),
];

pub fn default_menu() -> Vec<MenuItem> {
    DEFAULT_MENU
        .iter()
        .map(|&(id, name, description, price, category, highlight, image)| MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            highlight,
            image: image.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_menu_is_well_formed() {
        let menu = default_menu();
        assert_eq!(menu.len(), 17);

        let ids: HashSet<_> = menu.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), menu.len(), "ids must be unique");

        for item in &menu {
            assert!(!item.name.is_empty());
            assert!(item.price >= 0.0);
            assert_eq!(item.category, item.category.to_lowercase());
        }
    }
}
