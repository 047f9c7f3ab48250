// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Register two message types at runtime, pack a sample grid to JSON, unpack
// it back, and print both forms.
//
// Run with: cargo run --example telemetry

use std::any::Any;

use dynmsg::{
    impl_message_field, pack_pretty, unpack, FieldTable, FieldView, FieldsBuilder, FromFields,
    Message, Result, SchemaRegistry, TypeKey, TypeKind,
};

#[derive(Debug, Clone, PartialEq)]
struct CellReading {
    level: i64,
}

impl Message for CellReading {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<Self>()
    }

    fn field(&self, name: &str) -> Option<FieldView<'_>> {
        match name {
            "level" => Some(FieldView::Int(self.level)),
            _ => None,
        }
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl FromFields for CellReading {
    fn from_fields(mut fields: FieldTable) -> Result<Self> {
        Ok(Self {
            level: fields.take("level")?,
        })
    }
}

impl_message_field!(CellReading);

#[derive(Debug, Clone, PartialEq)]
struct SensorGrid {
    station: Option<String>,
    cells: Vec<Vec<CellReading>>,
}

impl Message for SensorGrid {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<Self>()
    }

    fn field(&self, name: &str) -> Option<FieldView<'_>> {
        match name {
            "station" => Some(self.station.as_deref().into()),
            "cells" => Some(FieldView::list(self.cells.iter().map(|row| {
                FieldView::list(row.iter().map(|cell| FieldView::message(cell)))
            }))),
            _ => None,
        }
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl FromFields for SensorGrid {
    fn from_fields(mut fields: FieldTable) -> Result<Self> {
        Ok(Self {
            station: fields.take("station")?,
            cells: fields.take("cells")?,
        })
    }
}

fn main() -> Result<()> {
    let mut registry = SchemaRegistry::new();
    registry.register_named::<CellReading>(
        "CellReading",
        FieldsBuilder::new().primitive("level").build(),
    );
    registry.register::<SensorGrid>(
        FieldsBuilder::new()
            .primitive("station")
            .array(
                "cells",
                TypeKind::array(TypeKind::message_named("CellReading")),
            )
            .build(),
    );

    let grid = SensorGrid {
        station: Some("north-2".to_string()),
        cells: vec![
            vec![CellReading { level: 71 }, CellReading { level: 72 }],
            vec![CellReading { level: 41 }, CellReading { level: 42 }],
        ],
    };

    let text = pack_pretty(&grid, &registry)?;
    println!("{text}");

    let back: SensorGrid = unpack(&text, &registry)?;
    assert_eq!(back, grid);
    println!("round trip ok: {} cells", back.cells.iter().map(Vec::len).sum::<usize>());

    Ok(())
}
