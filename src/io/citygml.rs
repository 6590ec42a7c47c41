// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Streaming CityGML reader
//!
//! Walks the document once with `quick-xml` and collects one [`CityObject`] per
//! `cityObjectMember` child, with its allow-listed attributes and every
//! `gml:Polygon` found underneath it grouped by semantic surface type.

use crate::city::{is_known_attribute, CityObject};
use crate::geometry::{Point, Polygon, Ring};
use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

/// GML geometry aggregates whose names end in `Surface` but carry no semantics
const GEOMETRY_SURFACES: [&str; 6] = [
    "Surface",
    "MultiSurface",
    "CompositeSurface",
    "OrientableSurface",
    "TriangulatedSurface",
    "PolyhedralSurface",
];

/// Parse a CityGML document into city objects, in document order
pub fn parse_citygml(xml: &str) -> Result<Vec<CityObject>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut walker = Walker::default();
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .with_context(|| format!("Malformed XML at byte {}", reader.buffer_position()))?;
        match event {
            Event::Start(ref e) => walker.start(e),
            Event::Empty(ref e) => {
                walker.start(e);
                walker.end()?;
            }
            Event::End(_) => walker.end()?,
            Event::Text(ref t) => {
                let text = t
                    .unescape()
                    .with_context(|| format!("Bad text at byte {}", reader.buffer_position()))?;
                walker.text(&text);
            }
            Event::CData(ref t) => walker.text(&String::from_utf8_lossy(t)),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!(objects = walker.objects.len(), "parsed CityGML document");
    Ok(walker.objects)
}

/// Boundary surfaces, openings and any other `*Surface` that is not plain GML geometry
fn is_semantic_surface(name: &str) -> bool {
    name == "Door"
        || name == "Window"
        || (name.ends_with("Surface")
            && name.starts_with(|c: char| c.is_ascii_uppercase())
            && !GEOMETRY_SURFACES.contains(&name))
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn gml_id(e: &BytesStart) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"id")
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RingRole {
    Exterior,
    Interior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoordinateFormat {
    /// `gml:posList` and `gml:pos`: whitespace separated numbers
    Positions,
    /// `gml:coordinates`: `x,y,z` tuples separated by whitespace
    Tuples,
}

#[derive(Debug)]
struct RingState {
    role: RingRole,
    depth: usize,
    values: Vec<f64>,
    text: Option<(CoordinateFormat, String)>,
}

#[derive(Debug)]
struct PolygonState {
    depth: usize,
    surface_type: String,
    exterior: Option<Ring>,
    interiors: Vec<Ring>,
    ring: Option<RingState>,
}

#[derive(Debug)]
struct ObjectState {
    object: CityObject,
    depth: usize,
    surfaces: Vec<(usize, String)>,
    attribute: Option<(String, String)>,
    polygon: Option<PolygonState>,
}

/// Element stack plus whatever object, polygon and ring are currently open
#[derive(Debug, Default)]
struct Walker {
    stack: Vec<String>,
    current: Option<ObjectState>,
    objects: Vec<CityObject>,
}

impl Walker {
    fn start(&mut self, e: &BytesStart) {
        let name = local_name(e);
        let depth = self.stack.len();

        if let Some(state) = self.current.as_mut() {
            state.start(&name, depth);
        } else if self.stack.last().map(String::as_str) == Some("cityObjectMember") {
            let id = gml_id(e).unwrap_or_default();
            self.current = Some(ObjectState {
                object: CityObject::new(id, name.clone()),
                depth,
                surfaces: Vec::new(),
                attribute: None,
                polygon: None,
            });
        }

        self.stack.push(name);
    }

    fn text(&mut self, text: &str) {
        let Some(state) = self.current.as_mut() else {
            return;
        };
        if let Some((_, buffer)) = state
            .polygon
            .as_mut()
            .and_then(|p| p.ring.as_mut())
            .and_then(|r| r.text.as_mut())
        {
            buffer.push_str(text);
            buffer.push(' ');
        } else if let Some((_, value)) = state.attribute.as_mut() {
            value.push_str(text);
        }
    }

    fn end(&mut self) -> Result<()> {
        if self.stack.pop().is_none() {
            return Ok(());
        }
        let depth = self.stack.len();

        let Some(state) = self.current.as_mut() else {
            return Ok(());
        };
        if depth == state.depth {
            if let Some(state) = self.current.take() {
                self.objects.push(state.object);
            }
            return Ok(());
        }

        state
            .end(depth)
            .with_context(|| format!("In city object {:?}", state.object.id))
    }
}

impl ObjectState {
    fn start(&mut self, name: &str, depth: usize) {
        if depth == self.depth + 1 && is_known_attribute(name) {
            self.attribute = Some((name.to_string(), String::new()));
        }

        if is_semantic_surface(name) {
            self.surfaces.push((depth, name.to_string()));
        }

        if let Some(polygon) = self.polygon.as_mut() {
            polygon.start(name, depth);
        } else if name == "Polygon" {
            let surface_type = self
                .surfaces
                .last()
                .map(|(_, surface)| surface.clone())
                .unwrap_or_else(|| self.object.object_type.clone());
            self.polygon = Some(PolygonState {
                depth,
                surface_type,
                exterior: None,
                interiors: Vec::new(),
                ring: None,
            });
        }
    }

    fn end(&mut self, depth: usize) -> Result<()> {
        if let Some(polygon) = self.polygon.as_mut() {
            if depth == polygon.depth {
                if let Some(polygon) = self.polygon.take() {
                    self.finish_polygon(polygon);
                }
            } else {
                polygon.end(depth)?;
            }
        }

        if depth == self.depth + 1 {
            if let Some((attribute, value)) = self.attribute.take() {
                self.object.set_attribute(&attribute, value.trim());
            }
        }

        if self.surfaces.last().is_some_and(|(d, _)| *d == depth) {
            self.surfaces.pop();
        }

        Ok(())
    }

    fn finish_polygon(&mut self, polygon: PolygonState) {
        match polygon.exterior {
            Some(exterior) => self
                .object
                .add_polygon(polygon.surface_type, Polygon::new(exterior, polygon.interiors)),
            None => warn!(
                object = %self.object.id,
                surface_type = %polygon.surface_type,
                "polygon without exterior ring, skipping"
            ),
        }
    }
}

impl PolygonState {
    fn start(&mut self, name: &str, depth: usize) {
        let role = match name {
            "exterior" | "outerBoundaryIs" => Some(RingRole::Exterior),
            "interior" | "innerBoundaryIs" => Some(RingRole::Interior),
            _ => None,
        };

        if let Some(ring) = self.ring.as_mut() {
            let format = match name {
                "posList" | "pos" => Some(CoordinateFormat::Positions),
                "coordinates" => Some(CoordinateFormat::Tuples),
                _ => None,
            };
            if let Some(format) = format {
                ring.text = Some((format, String::new()));
            }
        } else if let Some(role) = role {
            self.ring = Some(RingState {
                role,
                depth,
                values: Vec::new(),
                text: None,
            });
        }
    }

    fn end(&mut self, depth: usize) -> Result<()> {
        let Some(ring) = self.ring.as_mut() else {
            return Ok(());
        };

        if let Some((format, text)) = ring.text.take() {
            parse_numbers(&text, format, &mut ring.values)?;
        }

        if depth != ring.depth {
            return Ok(());
        }

        if let Some(ring) = self.ring.take() {
            let ring_points = points_from_values(&ring.values)?;
            match ring.role {
                RingRole::Exterior if self.exterior.is_some() => {
                    warn!("polygon with more than one exterior ring, keeping the first")
                }
                RingRole::Exterior => self.exterior = Some(ring_points),
                RingRole::Interior => self.interiors.push(ring_points),
            }
        }
        Ok(())
    }
}

fn parse_numbers(text: &str, format: CoordinateFormat, out: &mut Vec<f64>) -> Result<()> {
    let separator = |c: char| c.is_whitespace() || (format == CoordinateFormat::Tuples && c == ',');

    for token in text.split(separator).filter(|token| !token.is_empty()) {
        let value: f64 = token
            .parse()
            .with_context(|| format!("Invalid coordinate {:?}", token))?;
        if !value.is_finite() {
            bail!("Non-finite coordinate {:?}", token);
        }
        out.push(value);
    }
    Ok(())
}

fn points_from_values(values: &[f64]) -> Result<Ring> {
    if values.len() % 3 != 0 {
        bail!(
            "Ring has {} coordinate values, which is not a multiple of 3",
            values.len()
        );
    }
    Ok(Ring::new(
        values
            .chunks_exact(3)
            .map(|xyz| Point::new(xyz[0], xyz[1], xyz[2]))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILDING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<core:CityModel xmlns:core="http://www.opengis.net/citygml/2.0"
                xmlns:bldg="http://www.opengis.net/citygml/building/2.0"
                xmlns:gml="http://www.opengis.net/gml">
  <core:cityObjectMember>
    <bldg:Building gml:id="B1">
      <gml:name>Town hall</gml:name>
      <bldg:measuredHeight uom="m">12.5</bldg:measuredHeight>
      <core:creationDate>2020-01-01</core:creationDate>
      <bldg:boundedBy>
        <bldg:RoofSurface gml:id="R1">
          <bldg:lod2MultiSurface>
            <gml:MultiSurface>
              <gml:surfaceMember>
                <gml:Polygon>
                  <gml:exterior>
                    <gml:LinearRing>
                      <gml:posList srsDimension="3">0 0 10 10 0 10 10 10 10 0 10 10 0 0 10</gml:posList>
                    </gml:LinearRing>
                  </gml:exterior>
                  <gml:interior>
                    <gml:LinearRing>
                      <gml:pos>3 3 10</gml:pos>
                      <gml:pos>3 7 10</gml:pos>
                      <gml:pos>7 7 10</gml:pos>
                      <gml:pos>7 3 10</gml:pos>
                      <gml:pos>3 3 10</gml:pos>
                    </gml:LinearRing>
                  </gml:interior>
                </gml:Polygon>
              </gml:surfaceMember>
            </gml:MultiSurface>
          </bldg:lod2MultiSurface>
        </bldg:RoofSurface>
      </bldg:boundedBy>
    </bldg:Building>
  </core:cityObjectMember>
  <core:cityObjectMember>
    <veg:SolitaryVegetationObject xmlns:veg="http://www.opengis.net/citygml/vegetation/2.0" gml:id="T1">
      <veg:species>1070</veg:species>
      <veg:lod1Geometry>
        <gml:Polygon>
          <gml:outerBoundaryIs>
            <gml:LinearRing>
              <gml:coordinates>0,0,0 1,0,0 0,1,0</gml:coordinates>
            </gml:LinearRing>
          </gml:outerBoundaryIs>
        </gml:Polygon>
      </veg:lod1Geometry>
    </veg:SolitaryVegetationObject>
  </core:cityObjectMember>
</core:CityModel>"#;

    #[test]
    fn test_objects_and_attributes() -> Result<()> {
        let objects = parse_citygml(BUILDING)?;
        assert_eq!(objects.len(), 2);

        let building = &objects[0];
        assert_eq!(building.id, "B1");
        assert_eq!(building.object_type, "Building");
        assert_eq!(building.attribute("name"), Some("Town hall"));
        assert_eq!(building.attribute("measuredHeight"), Some("12.5"));
        assert_eq!(building.attribute("creationDate"), None);

        let tree = &objects[1];
        assert_eq!(tree.id, "T1");
        assert_eq!(tree.object_type, "SolitaryVegetationObject");
        assert_eq!(tree.attribute("species"), Some("1070"));
        Ok(())
    }

    #[test]
    fn test_polygons_grouped_by_surface() -> Result<()> {
        let objects = parse_citygml(BUILDING)?;

        let roofs = &objects[0].polygons()["RoofSurface"];
        assert_eq!(roofs.len(), 1);
        assert_eq!(roofs[0].exterior.len(), 5);
        assert_eq!(roofs[0].interiors.len(), 1);
        assert_eq!(roofs[0].interiors[0].points[1], Point::new(3.0, 7.0, 10.0));

        // No semantic surface: keyed by the object type
        let tree = &objects[1].polygons()["SolitaryVegetationObject"];
        assert_eq!(tree[0].exterior.len(), 3);
        assert_eq!(tree[0].exterior.points[2], Point::new(0.0, 1.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_incomplete_triple_is_an_error() {
        let xml = BUILDING.replace("0 0 10 10 0 10", "0 0 10 10 0");
        assert!(parse_citygml(&xml).is_err());
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let xml = BUILDING.replace("0,1,0", "0,one,0");
        assert!(parse_citygml(&xml).is_err());
    }

    #[test]
    fn test_non_finite_number_is_an_error() {
        for token in ["NaN", "inf", "-infinity"] {
            let xml = BUILDING.replace(
                "0 0 10 10 0 10 10 10",
                &format!("{token} 0 10 10 0 10 10 10"),
            );
            assert!(parse_citygml(&xml).is_err(), "{token} accepted");
        }
    }

    #[test]
    fn test_cdata_coordinates() -> Result<()> {
        let xml = BUILDING.replace(
            "<gml:coordinates>0,0,0 1,0,0 0,1,0</gml:coordinates>",
            "<gml:coordinates><![CDATA[0,0,0 1,0,0 0,1,0]]></gml:coordinates>",
        );
        let objects = parse_citygml(&xml)?;
        let tree = &objects[1].polygons()["SolitaryVegetationObject"];
        assert_eq!(tree[0].exterior.len(), 3);
        assert_eq!(tree[0].exterior.points[1], Point::new(1.0, 0.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_semantic_surface_names() {
        assert!(is_semantic_surface("WallSurface"));
        assert!(is_semantic_surface("OuterCeilingSurface"));
        assert!(is_semantic_surface("Door"));
        assert!(!is_semantic_surface("MultiSurface"));
        assert!(!is_semantic_surface("lod2MultiSurface"));
        assert!(!is_semantic_surface("boundedBy"));
    }
}
