use super::*;
use serde_json::json;

fn sample_result_json() -> serde_json::Value {
    json!({
        "historial_centroides": [
            [[10.0, 10.0], [80.0, 80.0]],
            [[12.5, 11.0], [78.0, 81.5]]
        ],
        "etiquetas": [0, 0, 1, 1, 0],
        "resumen": { "k_usuario": 2, "k_optimo": 3 },
        "metricas": {
            "silhouette_score": 0.71,
            "davies_bouldin_index": 0.42,
            "inercia": 1234.5,
            "distancia_promedio": 8.25,
            "evaluacion_calidad": {
                "puntuacion_total": 6,
                "detalles": ["Buena cohesión", "Separación aceptable"],
                "recomendacion": "k=2 es razonable"
            }
        }
    })
}

// ========================================================================
// Wire format
// ========================================================================

#[test]
fn test_generate_request_uses_service_field_names() {
    let req = GenerateRequest {
        count: 20,
        space_size: 150,
    };
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value, json!({ "n_vecindarios": 20, "tamano_espacio": 150 }));
}

#[test]
fn test_points_serialize_as_pairs() {
    let points = vec![Point::new(1.5, 2.0), Point::new(3.0, 4.25)];
    let req = ClusteringRequest {
        points: &points,
        k: 2,
        space_size: 100,
    };
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(
        value,
        json!({ "vecindarios": [[1.5, 2.0], [3.0, 4.25]], "k": 2, "tamano_espacio": 100 })
    );
}

#[test]
fn test_k_analysis_request_fields() {
    let points = vec![Point::new(0.0, 0.0)];
    let req = KAnalysisRequest {
        points: &points,
        k_max: 7,
        space_size: 80,
    };
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["k_max"], 7);
    assert_eq!(value["tamano_espacio"], 80);
    assert_eq!(value["vecindarios"], json!([[0.0, 0.0]]));
}

#[test]
fn test_generate_response_parses_pairs() {
    let res: GenerateResponse =
        serde_json::from_value(json!({ "vecindarios": [[1, 2], [3.5, 4]] })).unwrap();
    assert_eq!(res.points, vec![Point::new(1.0, 2.0), Point::new(3.5, 4.0)]);
}

#[test]
fn test_clustering_result_parses() {
    let result: ClusteringResult = serde_json::from_value(sample_result_json()).unwrap();

    assert_eq!(result.centroid_history.len(), 2);
    assert_eq!(result.k(), 2);
    assert_eq!(result.labels, vec![0, 0, 1, 1, 0]);
    assert_eq!(result.summary.requested_k, 2);
    assert_eq!(result.summary.optimal_k, 3);
    assert_eq!(result.metrics.inertia, 1234.5);
    assert_eq!(result.metrics.quality.total_score, 6.0);
    assert_eq!(result.metrics.quality.details.len(), 2);
}

#[test]
fn test_k_analysis_parses() {
    let analysis: KAnalysis = serde_json::from_value(json!({
        "resultados": [
            { "k": 2, "inercia": 900.0, "silhouette": 0.55 },
            { "k": 3, "inercia": 500.0, "silhouette": 0.61 }
        ],
        "k_optimo": 3
    }))
    .unwrap();

    assert_eq!(analysis.optimal_k, 3);
    assert_eq!(analysis.results[1].k, 3);
    assert_eq!(analysis.results[0].inertia, 900.0);
}

// ========================================================================
// Result shape checks
// ========================================================================

#[test]
fn test_validate_accepts_consistent_result() {
    let result: ClusteringResult = serde_json::from_value(sample_result_json()).unwrap();
    assert_eq!(result.validate(5), Ok(()));
}

#[test]
fn test_validate_rejects_label_count_mismatch() {
    let result: ClusteringResult = serde_json::from_value(sample_result_json()).unwrap();
    assert_eq!(
        result.validate(6),
        Err(ResultShapeError::LabelCountMismatch {
            labels: 5,
            points: 6
        })
    );
}

#[test]
fn test_validate_rejects_out_of_range_label() {
    let mut result: ClusteringResult = serde_json::from_value(sample_result_json()).unwrap();
    result.labels[3] = 2;
    assert_eq!(
        result.validate(5),
        Err(ResultShapeError::LabelOutOfRange {
            position: 3,
            label: 2,
            k: 2
        })
    );
}

#[test]
fn test_validate_rejects_ragged_history() {
    let mut result: ClusteringResult = serde_json::from_value(sample_result_json()).unwrap();
    result.centroid_history[1].pop();
    assert!(matches!(
        result.validate(5),
        Err(ResultShapeError::CentroidCountMismatch { iteration: 1, .. })
    ));
}

#[test]
fn test_validate_rejects_empty_history() {
    let mut result: ClusteringResult = serde_json::from_value(sample_result_json()).unwrap();
    result.centroid_history.clear();
    assert_eq!(result.validate(5), Err(ResultShapeError::EmptyHistory));
}

// ========================================================================
// Client
// ========================================================================

#[test]
fn test_client_trims_trailing_slash() {
    let client = HttpServiceClient::new("http://localhost:8000/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000");
    assert_eq!(
        client.url(GENERATE_PATH),
        "http://localhost:8000/generar-vecindarios"
    );
}

#[tokio::test]
async fn test_client_unreachable_is_transport_error() {
    // Port 9 (discard) is not expected to serve HTTP
    let client = HttpServiceClient::new("http://127.0.0.1:9").unwrap();
    let req = GenerateRequest {
        count: 10,
        space_size: 50,
    };
    let err = client.generate_points(&req).await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)));
}

// Integration test - requires the clustering service running locally
#[tokio::test]
#[ignore]
async fn test_client_round_trip() {
    let client = HttpServiceClient::new("http://localhost:8000").unwrap();
    let generated = client
        .generate_points(&GenerateRequest {
            count: 20,
            space_size: 100,
        })
        .await
        .unwrap();
    assert_eq!(generated.points.len(), 20);

    let result = client
        .compute_clustering(&ClusteringRequest {
            points: &generated.points,
            k: 4,
            space_size: 100,
        })
        .await
        .unwrap();
    assert!(result.validate(20).is_ok());
    assert_eq!(result.k(), 4);
}
