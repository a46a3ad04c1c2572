use anyhow::{anyhow, Context, Result};
use apache_avro::types::Value as AvroValue;
use apache_avro::Schema;
use log::{debug, error, info, warn};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::ClientConfig;
use schema_registry_converter::async_impl::avro::AvroEncoder;
use schema_registry_converter::async_impl::schema_registry::SrSettings;
use schema_registry_converter::schema_registry_common::SubjectNameStrategy;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::model::liquidity_row::LiquidityRow;
use crate::domain::traits::RowSink;
use crate::infrastructure::kafka::helper::{AvroConverter, SchemaHelper};

/// Topic type (and schema directory name) of the liquidity rows
pub const LIQUIDITY_TOPIC_TYPE: &str = "liquidity";

/// Kafka producer with schema registry support
pub struct KafkaProducer {
    /// Kafka producer client
    producer: FutureProducer,

    /// Topic type -> topic name
    topics: HashMap<String, String>,

    schema_helper: SchemaHelper,

    schema_registry_url: String,

    /// Registered schema ids (topic -> id)
    schema_ids: RwLock<HashMap<String, i32>>,

    sr_settings: SrSettings,

    http: reqwest::Client,

    /// Delivery timeout for each message
    send_timeout: Duration,
}

impl KafkaProducer {
    /// Creates a producer and makes sure the liquidity schema is registered
    pub async fn new(
        bootstrap_servers: &str,
        schema_registry_url: &str,
        topics: HashMap<String, String>,
        schema_dir: &str,
        timeout_ms: u64,
    ) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", bootstrap_servers)
            .set("message.timeout.ms", timeout_ms.to_string())
            .create()
            .context("Failed to create Kafka producer")?;

        let producer = Self {
            producer,
            topics,
            schema_helper: SchemaHelper::new(schema_dir),
            schema_registry_url: schema_registry_url.trim_end_matches('/').to_string(),
            schema_ids: RwLock::new(HashMap::new()),
            sr_settings: SrSettings::new(schema_registry_url.to_string()),
            http: reqwest::Client::new(),
            send_timeout: Duration::from_millis(timeout_ms),
        };

        info!("Preloading schemas from registry...");
        if let Err(e) = producer.preload_schema(LIQUIDITY_TOPIC_TYPE).await {
            warn!("Failed to preload schema for {}: {}", LIQUIDITY_TOPIC_TYPE, e);
        }

        Ok(producer)
    }

    /// Gets the topic name for a given topic type
    pub fn get_topic(&self, topic_type: &str) -> String {
        self.topics.get(topic_type)
            .cloned()
            .unwrap_or_else(|| format!("liquidity.{}.avro", topic_type))
    }

    /// Looks the schema up in the registry, registering it from disk when absent
    async fn preload_schema(&self, topic_type: &str) -> Result<(String, i32)> {
        let topic = self.get_topic(topic_type);
        info!("Preloading schema for topic type: {} (topic: {})", topic_type, topic);

        let schema_id = match self.get_schema_id(&topic).await {
            Ok(id) => {
                info!("Found existing schema for {} with ID: {}", topic_type, id);
                id
            }
            Err(_) => {
                info!("Schema not found in registry for {}. Registering from file.", topic_type);
                let content = self.schema_helper.get_schema_content(topic_type)?;
                self.register_schema(&topic, &content).await?
            }
        };

        self.schema_ids.write().await.insert(topic.clone(), schema_id);
        Ok((topic, schema_id))
    }

    /// Topic and schema id for a topic type, preloading on first use
    async fn get_cached_schema(&self, topic_type: &str) -> Result<(String, i32)> {
        let topic = self.get_topic(topic_type);
        if let Some(id) = self.schema_ids.read().await.get(&topic).copied() {
            return Ok((topic, id));
        }

        warn!("Schema for {} not cached, loading it now", topic_type);
        self.preload_schema(topic_type).await
    }

    /// Register a schema with the schema registry
    pub async fn register_schema(&self, topic: &str, schema_content: &str) -> Result<i32> {
        let subject = format!("{}-value", topic);
        let register_url = format!("{}/subjects/{}/versions", self.schema_registry_url, subject);

        Schema::parse_str(schema_content).context("Failed to parse Avro schema")?;

        info!("Registering schema for topic: {}", topic);
        let response = self.http.post(&register_url)
            .json(&serde_json::json!({ "schema": schema_content }))
            .send()
            .await
            .context("Failed to send schema registration request")?;

        let status = response.status();
        if status.is_success() {
            let body = response.json::<serde_json::Value>().await?;
            let schema_id = Self::schema_id_from(&body)?;
            info!("Schema registration successful with ID: {}", schema_id);
            return Ok(schema_id);
        }

        let error_text = response.text().await?;
        if status.as_u16() == 409 {
            info!("Schema already exists: {}", error_text);
            return self.get_schema_id(topic).await;
        }

        error!("Schema registration failed with status: {}, error: {}", status, error_text);
        Err(anyhow!("Failed to register schema: {}", error_text))
    }

    /// Get the latest schema id registered for a topic
    pub async fn get_schema_id(&self, topic: &str) -> Result<i32> {
        let url = format!("{}/subjects/{}-value/versions/latest", self.schema_registry_url, topic);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("Failed to get schema ID for topic: {}", topic));
        }
        let body = response.json::<serde_json::Value>().await?;
        Self::schema_id_from(&body)
    }

    fn schema_id_from(body: &serde_json::Value) -> Result<i32> {
        body["id"].as_i64()
            .map(|id| id as i32)
            .ok_or_else(|| anyhow!("Schema registry response has no id: {}", body))
    }

    /// Encode a record in Confluent wire format (magic byte + schema id + Avro body)
    async fn encode_confluent_format(&self, record_name: &str, fields: Vec<(&'static str, AvroValue)>, topic: &str) -> Result<Vec<u8>> {
        let subject_strategy = SubjectNameStrategy::TopicNameStrategy(topic.to_string(), false);

        let encoder = AvroEncoder::new(self.sr_settings.clone());
        match encoder.encode(fields, subject_strategy).await {
            Ok(payload) => {
                debug!("Encoded {} with Confluent format, size: {} bytes", record_name, payload.len());
                Ok(payload)
            }
            Err(e) => {
                error!("Failed to encode {} with Confluent format: {}", record_name, e);
                Err(anyhow!("Failed to encode {} value: {}", record_name, e))
            }
        }
    }

    /// Send one liquidity row to Kafka
    pub async fn send_row(&self, row: &LiquidityRow) -> Result<()> {
        let (topic, _) = self.get_cached_schema(LIQUIDITY_TOPIC_TYPE).await?;

        let avro_fields = AvroConverter::liquidity_row_to_avro_value(row);
        let payload = self.encode_confluent_format("liquidity row", avro_fields, &topic).await?;
        let key = format!("{}-{}-{}", row.dataset, row.source, Uuid::new_v4());

        match self.producer
            .send(FutureRecord::to(&topic).payload(&payload).key(&key), self.send_timeout)
            .await
        {
            Ok((partition, offset)) => {
                debug!("Sent {} to topic: {}, partition: {}, offset: {}", row, topic, partition, offset);
                Ok(())
            }
            Err((err, _)) => {
                error!("Failed to send liquidity row: {}, row: {}", err, row);
                Err(anyhow!("Failed to send liquidity row: {}", err))
            }
        }
    }
}

impl RowSink for KafkaProducer {
    async fn publish_rows(&self, rows: &[LiquidityRow]) -> Result<()> {
        for row in rows {
            self.send_row(row).await?;
        }
        info!("Published {} liquidity rows to {}", rows.len(), self.get_topic(LIQUIDITY_TOPIC_TYPE));
        Ok(())
    }
}
