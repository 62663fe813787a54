//! Demo dataset used when the session holds no data yet

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Category, RawMaterial, StockInflow, StockOutflow, Supplier};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, day).unwrap_or_default()
}

/// Fixed-point helper: `dec(15075, 2)` is 150.75
fn dec(num: i64, scale: u32) -> Decimal {
    Decimal::new(num, scale)
}

pub fn categories() -> Vec<Category> {
    [
        "Metales",
        "Plásticos",
        "Maderas",
        "Químicos",
        "Telas",
        "Componentes Electrónicos",
        "Bobinas",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| Category {
        id: format!("cat-{}", i + 1),
        name: name.to_string(),
    })
    .collect()
}

pub fn suppliers() -> Vec<Supplier> {
    let supplier = |id: &str,
                    name: &str,
                    tax_id: &str,
                    address: &str,
                    phone: &str,
                    email: &str,
                    contact: &str,
                    notes: &str| Supplier {
        id: id.to_string(),
        name: name.to_string(),
        tax_id: tax_id.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        contact: contact.to_string(),
        notes: notes.to_string(),
    };

    vec![
        supplier(
            "supp-1",
            "Aceros del Sur S.A.",
            "30-12345678-9",
            "Av. Industrial 123",
            "11-4567-8901",
            "ventas@acerosdelsur.com",
            "Juan Perez",
            "Entrega los martes.",
        ),
        supplier(
            "supp-2",
            "Plásticos ABC",
            "30-98765432-1",
            "Calle Falsa 456",
            "11-2345-6789",
            "contacto@plasticosabc.com",
            "Maria Gomez",
            "Pedido mínimo 100kg.",
        ),
        supplier(
            "supp-3",
            "Maderera El Bosque",
            "30-55555555-5",
            "Ruta 8 Km 50",
            "11-8765-4321",
            "info@elbosque.com",
            "Carlos Rodriguez",
            "Madera de pino y roble.",
        ),
    ]
}

pub fn raw_materials() -> Vec<RawMaterial> {
    let material = |id: &str,
                    sku: &str,
                    name: &str,
                    description: &str,
                    category: &str,
                    unit: &str,
                    cost: Decimal,
                    min_stock: i64,
                    supplier_id: &str| RawMaterial {
        id: id.to_string(),
        sku: sku.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        unit: unit.to_string(),
        cost,
        min_stock: Decimal::from(min_stock),
        supplier_id: supplier_id.to_string(),
        width: None,
        thickness: None,
    };

    let mut coil = material(
        "rm-5",
        "BO-001",
        "Bobina de Acero Galvanizado",
        "Para estampado",
        "Bobinas",
        "kg",
        dec(3580, 2),
        1000,
        "supp-1",
    );
    coil.width = Some(Decimal::from(1500));
    coil.thickness = Some(dec(5, 1));

    vec![
        material(
            "rm-1",
            "AC-001",
            "Plancha de Acero Inoxidable",
            "Plancha 2mm 1x2mts",
            "Metales",
            "unidades",
            dec(15075, 2),
            10,
            "supp-1",
        ),
        material(
            "rm-2",
            "PL-001",
            "Polietileno de Alta Densidad (PEAD)",
            "Granulado blanco",
            "Plásticos",
            "kg",
            dec(2550, 2),
            500,
            "supp-2",
        ),
        material(
            "rm-3",
            "MA-001",
            "Tirante de Pino",
            "2x4 pulgadas x 3mts",
            "Maderas",
            "unidades",
            dec(4520, 2),
            100,
            "supp-3",
        ),
        material(
            "rm-4",
            "AC-002",
            "Tornillos Autorroscantes",
            "Cabeza Phillips 1 pulgada",
            "Metales",
            "cajas",
            dec(1200, 2),
            20,
            "supp-1",
        ),
        coil,
    ]
}

pub fn inflows() -> Vec<StockInflow> {
    let inflow = |id: &str, day: u32, material: &str, qty: i64, supplier: &str, invoice: &str, notes: &str| {
        StockInflow {
            id: id.to_string(),
            date: date(day),
            raw_material_id: material.to_string(),
            quantity: Decimal::from(qty),
            supplier_id: supplier.to_string(),
            invoice_number: invoice.to_string(),
            notes: notes.to_string(),
        }
    };

    vec![
        inflow("in-1", 1, "rm-1", 50, "supp-1", "FC-001-1234", ""),
        inflow("in-2", 2, "rm-2", 1000, "supp-2", "FC-002-5678", "Control de calidad OK"),
        inflow("in-3", 3, "rm-3", 200, "supp-3", "FC-003-9012", ""),
        inflow("in-4", 5, "rm-4", 50, "supp-1", "FC-001-1250", ""),
        inflow("in-5", 6, "rm-5", 5000, "supp-1", "FC-001-1260", ""),
    ]
}

pub fn outflows() -> Vec<StockOutflow> {
    let outflow = |id: &str, day: u32, material: &str, qty: i64, work_order: &str, responsible: &str, notes: &str| {
        StockOutflow {
            id: id.to_string(),
            date: date(day),
            raw_material_id: material.to_string(),
            quantity: Decimal::from(qty),
            work_order: work_order.to_string(),
            responsible: responsible.to_string(),
            notes: notes.to_string(),
        }
    };

    vec![
        outflow("out-1", 10, "rm-1", 15, "OT-2023-001", "Operario A", "Producción Lote 1"),
        outflow("out-2", 11, "rm-2", 250, "OT-2023-001", "Operario B", ""),
        outflow("out-3", 12, "rm-3", 80, "OT-2023-002", "Operario A", "Producción Lote 2"),
        outflow("out-4", 15, "rm-1", 5, "OT-2023-003", "Operario C", "Mantenimiento"),
        outflow("out-5", 16, "rm-4", 10, "OT-2023-002", "Operario B", ""),
        outflow("out-6", 17, "rm-5", 1200, "OT-2023-004", "Operario C", ""),
    ]
}
