//! Isochrone requests: graph fetch, reachability search and boundary
//! extraction for a single origin, plus a batch helper.

use geo::Point;
use geojson::Geometry;
use log::info;
use rayon::prelude::*;

use super::alpha_shape::AlphaShapeBuilder;
use super::point_cloud::PointCloud;
use super::polygonize::{FacePolygonizer, PolygonAssembler};
use super::shape_selector::ShapeSelector;
use super::triangulation::triangulate;
use crate::deadline::Deadline;
use crate::loading::GraphProvider;
use crate::routing::build_ego_network;
use crate::{
    DEFAULT_SPEED_KMH, Error, Isochrone, IsochroneConfig, Meters, Minutes, OutputFormat, RouteMode,
    meters_per_minute,
};

/// Parameters of one isochrone computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsochroneRequest {
    /// Longitude / latitude
    pub origin: Point<f64>,
    pub time_budget: Minutes,
    /// km/h
    pub speed_kmh: f64,
    pub mode: RouteMode,
    pub output: OutputFormat,
}

impl IsochroneRequest {
    pub fn new(origin: Point<f64>, time_budget: Minutes) -> Self {
        Self {
            origin,
            time_budget,
            speed_kmh: DEFAULT_SPEED_KMH,
            mode: RouteMode::default(),
            output: OutputFormat::default(),
        }
    }

    #[must_use]
    pub fn with_speed(mut self, speed_kmh: f64) -> Self {
        self.speed_kmh = speed_kmh;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: RouteMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Graph fetch radius: the straight-line distance coverable within the
    /// budget, widened by `multiplier`
    pub fn fetch_radius(&self, multiplier: f64) -> Meters {
        meters_per_minute(self.speed_kmh) * self.time_budget * multiplier
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IsochroneOutput {
    /// `GeoJSON` Polygon geometry
    Interchange(Geometry),
    Native(Isochrone),
}

impl IsochroneOutput {
    fn from_isochrone(isochrone: Isochrone, format: OutputFormat) -> Self {
        match format {
            OutputFormat::Interchange => IsochroneOutput::Interchange(isochrone.to_geojson()),
            OutputFormat::Native => IsochroneOutput::Native(isochrone),
        }
    }

    pub fn as_native(&self) -> Option<&Isochrone> {
        match self {
            IsochroneOutput::Native(isochrone) => Some(isochrone),
            IsochroneOutput::Interchange(_) => None,
        }
    }

    pub fn into_geojson(self) -> Geometry {
        match self {
            IsochroneOutput::Interchange(geometry) => geometry,
            IsochroneOutput::Native(isochrone) => isochrone.to_geojson(),
        }
    }
}

/// Computes the isochrone for `request` in the requested output format.
///
/// # Errors
///
/// `GraphUnavailable` and `GraphLookup` from graph acquisition,
/// `Triangulation` for degenerate reachable sets, `ScheduleExhausted` when
/// no alpha candidate yields a single polygon, `Assembly` on hard
/// assembly failures, `DeadlineExceeded` when a configured timeout passes.
pub fn build_isochrone<P>(
    provider: &P,
    request: &IsochroneRequest,
    config: &IsochroneConfig,
) -> Result<IsochroneOutput, Error>
where
    P: GraphProvider + ?Sized,
{
    let isochrone = compute_isochrone(provider, &FacePolygonizer, request, config)?;
    Ok(IsochroneOutput::from_isochrone(isochrone, request.output))
}

/// Runs the whole pipeline with an explicit polygon assembler
pub fn compute_isochrone<P, A>(
    provider: &P,
    assembler: &A,
    request: &IsochroneRequest,
    config: &IsochroneConfig,
) -> Result<Isochrone, Error>
where
    P: GraphProvider + ?Sized,
    A: PolygonAssembler + Sync,
{
    config.validate()?;
    let deadline = Deadline::after(config.timeout());

    let radius = request.fetch_radius(config.fetch_radius_multiplier);
    info!(
        "Isochrone from ({}, {}): {} min at {} km/h ({}), fetch radius {radius:.0} m",
        request.origin.x(),
        request.origin.y(),
        request.time_budget,
        request.speed_kmh,
        request.mode
    );

    let graph = provider.fetch(request.origin, radius, request.mode)?;
    let ego = build_ego_network(
        graph,
        request.origin,
        request.time_budget,
        request.speed_kmh,
        &deadline,
    )?;
    info!("Reached {} nodes within {} min", ego.len(), request.time_budget);

    let cloud = PointCloud::from_ego_network(&ego);
    isochrone_from_point_cloud(&cloud, request.time_budget, assembler, config, &deadline)
}

/// Boundary extraction for an already computed point cloud.
///
/// Fewer than four points short-circuit to their convex hull.
pub fn isochrone_from_point_cloud<A>(
    cloud: &PointCloud,
    time_budget: Minutes,
    assembler: &A,
    config: &IsochroneConfig,
    deadline: &Deadline,
) -> Result<Isochrone, Error>
where
    A: PolygonAssembler + Sync,
{
    if cloud.is_empty() {
        return Err(Error::Triangulation(
            "no street node is reachable within the time budget".to_string(),
        ));
    }
    if cloud.needs_hull_fallback() {
        info!("Only {} points reached, using convex hull", cloud.len());
        return Ok(Isochrone::new(cloud.convex_hull(), None, cloud.len(), time_budget));
    }

    let triangulation = triangulate(cloud.points())?;
    let selector = ShapeSelector::new(
        cloud.points(),
        &triangulation,
        AlphaShapeBuilder::new(config.degenerate_area_epsilon),
        assembler,
    );
    let candidates = config.alpha_schedule.candidates();
    let shape = if config.parallel_schedule {
        selector.select_parallel(&candidates, deadline)?
    } else {
        selector.select(&candidates, deadline)?
    };
    info!("Accepted alpha {} over {} triangles", shape.alpha, triangulation.len());

    Ok(Isochrone::new(
        shape.polygon,
        Some(shape.alpha),
        cloud.len(),
        time_budget,
    ))
}

/// Computes independent requests on the rayon pool, one result per
/// request in input order.
pub fn bulk_isochrones<P>(
    provider: &P,
    requests: &[IsochroneRequest],
    config: &IsochroneConfig,
) -> Vec<Result<IsochroneOutput, Error>>
where
    P: GraphProvider + Sync + ?Sized,
{
    requests
        .par_iter()
        .map(|request| build_isochrone(provider, request, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{Area, ConvexHull, MultiPoint, coord};

    use super::*;

    fn cloud(points: &[(f64, f64)]) -> PointCloud {
        PointCloud::new(points.iter().map(|&(x, y)| coord! { x: x, y: y }).collect())
    }

    #[test]
    fn fetch_radius_scales_with_budget() {
        let request = IsochroneRequest::new(Point::new(0.0, 0.0), 10.0);
        assert!((request.fetch_radius(1.5) - 1125.0).abs() < 1e-9);
        assert_eq!(request.mode, RouteMode::Walk);
        assert_eq!(request.output, OutputFormat::Interchange);
    }

    #[test]
    fn small_clouds_return_their_hull() {
        let config = IsochroneConfig::default();
        let points = [(0.0, 0.0), (1.0, 0.0), (0.2, 0.9)];
        let isochrone = isochrone_from_point_cloud(
            &cloud(&points),
            5.0,
            &FacePolygonizer,
            &config,
            &Deadline::unbounded(),
        )
        .unwrap();
        let hull: MultiPoint<f64> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let hull = hull.convex_hull();
        assert_eq!(isochrone.alpha(), None);
        assert_eq!(isochrone.polygon().unsigned_area(), hull.unsigned_area());
        assert_eq!(isochrone.polygon().exterior().0.len(), hull.exterior().0.len());
    }

    #[test]
    fn two_point_clouds_are_flagged_degenerate() {
        let isochrone = isochrone_from_point_cloud(
            &cloud(&[(0.0, 0.0), (1.0, 1.0)]),
            5.0,
            &FacePolygonizer,
            &IsochroneConfig::default(),
            &Deadline::unbounded(),
        )
        .unwrap();
        assert!(isochrone.is_degenerate());
        assert_eq!(isochrone.reached_nodes(), 2);
    }

    #[test]
    fn empty_cloud_is_a_triangulation_error() {
        let result = isochrone_from_point_cloud(
            &PointCloud::default(),
            5.0,
            &FacePolygonizer,
            &IsochroneConfig::default(),
            &Deadline::unbounded(),
        );
        assert!(matches!(result, Err(Error::Triangulation(_))));
    }

    #[test]
    fn collinear_clouds_surface_triangulation_errors() {
        let points: Vec<_> = (0..6).map(|i| (i as f64, 0.0)).collect();
        let result = isochrone_from_point_cloud(
            &cloud(&points),
            5.0,
            &FacePolygonizer,
            &IsochroneConfig::default(),
            &Deadline::unbounded(),
        );
        assert!(matches!(result, Err(Error::Triangulation(_))));
    }
}
