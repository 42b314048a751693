use criterion::{criterion_group, criterion_main, Criterion};
use geo::polygon;
use mssql_geometry::geo_traits::{Coord, CurveSegment};
use mssql_geometry::geometry::{DefaultFactory, Geometry, GeometryKind};
use mssql_geometry::io::geo::GeoFactory;
use mssql_geometry::io::sqlserver::{from_sqlserver, to_sqlserver, SqlServerOptions};

fn create_polygons() -> geo::Geometry {
    // An L shape
    let poly = polygon![
        (x: 0.0, y: 0.0),
        (x: 4.0, y: 0.0),
        (x: 4.0, y: 1.0),
        (x: 1.0, y: 1.0),
        (x: 1.0, y: 4.0),
        (x: 0.0, y: 4.0),
        (x: 0.0, y: 0.0),
    ];
    geo::MultiPolygon::new(vec![poly; 1000]).into()
}

fn create_curves() -> Geometry {
    let curve = |offset: f64| {
        Geometry::new(GeometryKind::CompoundCurve(vec![
            CurveSegment::Line(vec![Coord::xyz(offset, 0., 1.), Coord::xyz(offset + 1., 0., 1.)]),
            CurveSegment::Arc(vec![
                Coord::xyz(offset + 1., 0., 1.),
                Coord::xyz(offset + 2., 1., 2.),
                Coord::xyz(offset + 3., 0., 3.),
            ]),
        ]))
    };
    Geometry::new(GeometryKind::GeometryCollection(
        (0..1000).map(|i| curve(i as f64 * 3.)).collect(),
    ))
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let options = SqlServerOptions::default();
    let polygons = create_polygons();
    let polygon_buf = to_sqlserver(&polygons, &options).unwrap();
    let curves = create_curves();
    let curve_buf = to_sqlserver(&curves, &options).unwrap();

    c.bench_function("encode geo::MultiPolygon", |b| {
        b.iter(|| {
            let _buf = to_sqlserver(&polygons, &options).unwrap();
        })
    });
    c.bench_function("decode to geo::MultiPolygon", |b| {
        b.iter(|| {
            let _geom = from_sqlserver(&polygon_buf, &GeoFactory, &options).unwrap();
        })
    });
    c.bench_function("encode compound curves", |b| {
        b.iter(|| {
            let _buf = to_sqlserver(&curves, &options).unwrap();
        })
    });
    c.bench_function("decode compound curves", |b| {
        b.iter(|| {
            let _geom = from_sqlserver(&curve_buf, &DefaultFactory, &options).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
