use oss_resource_core::models::{Collection, CollectionTag};

use crate::adapters::serverless_api::{
    BatchGetCollectionRequest, CollectionDetail, CollectionSummary, CreateCollectionRequest,
    DeleteCollectionRequest, ListCollectionsRequest, ResourceTag, UpdateCollectionRequest,
};

pub fn to_create_request(model: &Collection, client_token: Option<&str>) -> CreateCollectionRequest {
    CreateCollectionRequest {
        name: model.name.clone().unwrap_or_default(),
        description: model.description.clone(),
        collection_type: model.collection_type.clone(),
        standby_replicas: model.standby_replicas.clone(),
        tags: model
            .tags
            .iter()
            .flatten()
            .map(|tag| ResourceTag {
                key: tag.key.clone(),
                value: tag.value.clone(),
            })
            .collect(),
        client_token: client_token.map(str::to_string),
    }
}

pub fn to_batch_get_request(id: &str) -> BatchGetCollectionRequest {
    BatchGetCollectionRequest {
        ids: vec![id.to_string()],
    }
}

/// Only the description is mutable after creation.
pub fn to_update_request(
    id: &str,
    model: &Collection,
    client_token: Option<&str>,
) -> UpdateCollectionRequest {
    UpdateCollectionRequest {
        id: id.to_string(),
        description: model.description.clone(),
        client_token: client_token.map(str::to_string),
    }
}

pub fn to_delete_request(id: &str, client_token: Option<&str>) -> DeleteCollectionRequest {
    DeleteCollectionRequest {
        id: id.to_string(),
        client_token: client_token.map(str::to_string),
    }
}

pub fn to_list_request(next_token: Option<String>, max_results: Option<i32>) -> ListCollectionsRequest {
    ListCollectionsRequest {
        next_token,
        max_results,
    }
}

pub fn from_detail(detail: CollectionDetail, tags: Option<Vec<ResourceTag>>) -> Collection {
    Collection {
        id: detail.id,
        name: detail.name,
        description: detail.description,
        collection_type: detail.collection_type,
        standby_replicas: detail.standby_replicas,
        arn: detail.arn,
        collection_endpoint: detail.collection_endpoint,
        dashboard_endpoint: detail.dashboard_endpoint,
        tags: tags
            .filter(|tags| !tags.is_empty())
            .map(|tags| {
                tags.into_iter()
                    .map(|tag| CollectionTag {
                        key: tag.key,
                        value: tag.value,
                    })
                    .collect()
            }),
    }
}

pub fn from_summary(summary: CollectionSummary) -> Collection {
    Collection {
        id: summary.id,
        name: summary.name,
        arn: summary.arn,
        ..Collection::default()
    }
}
