//! Database setup script.
//!
//! Recreates the three tables from scratch, opens them to the anon key through
//! row level security policies and seeds `menu_items`. Meant to be pasted into
//! the database's SQL editor once per project.

use std::fmt::Write as _;

use crate::models::menu::FALLBACK_CATEGORY;
use crate::models::MenuItem;

const TABLES: &[&str] = &["reservations", "announcements", "menu_items"];

const CREATE_TABLES: &str = "\
-- Reservations
create table reservations (
  id uuid default gen_random_uuid() primary key,
  created_at timestamp with time zone default timezone('utc'::text, now()) not null,
  client_name text,
  phone text,
  pax int,
  date text,
  time text,
  table_type text,
  status text default 'confirmed'
);

-- Announcements
create table announcements (
  id uuid default gen_random_uuid() primary key,
  created_at timestamp with time zone default timezone('utc'::text, now()) not null,
  message text,
  is_active boolean default true
);

-- Menu items
create table menu_items (
  id text primary key,
  name text,
  description text,
  price numeric,
  category text,
  highlight boolean,
  image text
);
";

/// Quote a value as a SQL string literal.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn seed_row(item: &MenuItem) -> String {
    let price = if item.price.is_finite() { item.price } else { 0.0 };
    let category = if item.category.is_empty() { FALLBACK_CATEGORY } else { &item.category };
    format!(
        "({}, {}, {}, {}, {}, {}, {})",
        quote(&item.id),
        quote(&item.name),
        quote(&item.description),
        price,
        quote(category),
        item.highlight,
        quote(&item.image)
    )
}

/// Full setup script, seeding the menu with `seed`.
pub fn setup_sql(seed: &[MenuItem]) -> String {
    let mut sql = String::from("-- Full reset: drops and recreates every table\n");
    for table in TABLES.iter().rev() {
        let _ = writeln!(sql, "DROP TABLE IF EXISTS {};", table);
    }
    sql.push('\n');
    sql.push_str(CREATE_TABLES);
    sql.push('\n');

    for table in TABLES {
        let _ = writeln!(sql, "alter table {} enable row level security;", table);
    }
    sql.push('\n');
    for table in TABLES {
        let _ = writeln!(
            sql,
            "create policy \"Public Access\" on {} for all using (true) with check (true);",
            table
        );
    }

    if !seed.is_empty() {
        let rows: Vec<String> = seed.iter().map(seed_row).collect();
        sql.push_str("\n-- Initial menu\n");
        sql.push_str("INSERT INTO menu_items (id, name, description, price, category, highlight, image)\nVALUES\n  ");
        sql.push_str(&rows.join(",\n  "));
        sql.push_str(";\n");
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_menu;

    #[test]
    fn test_setup_sql_structure() {
        let sql = setup_sql(&default_menu());
        assert!(sql.starts_with("-- Full reset"));
        for table in TABLES {
            assert!(sql.contains(&format!("DROP TABLE IF EXISTS {};", table)));
            assert!(sql.contains(&format!("create table {} (", table)));
            assert!(sql.contains(&format!("alter table {} enable row level security;", table)));
            assert!(sql.contains(&format!("create policy \"Public Access\" on {} for all", table)));
        }
        assert!(sql.contains("('1', 'Prime Tomahawk Gold'"));
        assert_eq!(sql.matches("\n  ('").count(), default_menu().len());
        for item in default_menu() {
            assert!(sql.contains(&quote(&item.image)), "missing image for {}", item.id);
        }
        assert!(sql.trim_end().ends_with(");"));
    }

    #[test]
    fn test_seed_values_are_escaped() {
        let item = MenuItem {
            id: "x'1".to_string(),
            name: "Chef's Choice".to_string(),
            description: "It's 'good'".to_string(),
            price: 12.5,
            category: String::new(),
            highlight: true,
            image: String::new(),
        };
        let sql = setup_sql(&[item]);
        assert!(sql.contains("('x''1', 'Chef''s Choice', 'It''s ''good''', 12.5, 'outros', true, '')"));
    }

    #[test]
    fn test_empty_seed_has_no_insert() {
        let sql = setup_sql(&[]);
        assert!(!sql.contains("INSERT INTO"));
        assert!(sql.contains("create table menu_items"));
    }
}
