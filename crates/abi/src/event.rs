use crate::{decode::decode_elementary_word, ComponentValue, Entry, TypeComponent};
use sigil_errors::{Error, ErrorCode, Result};
use sigil_primitives::B256;

/// An event log matched against an ABI event entry.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedEvent {
    /// The indexed parameters in declaration order. Dynamic indexed
    /// parameters surface as the raw 32-byte topic hash, since the log does
    /// not carry their preimage.
    pub indexed: Vec<ComponentValue>,
    /// The non-indexed parameters, decoded from the log `data` as a tuple.
    pub body: ComponentValue,
}

impl Entry {
    /// Matches a log's topics and data against this event entry.
    ///
    /// Unless the event is anonymous, `topics[0]` must equal the event's
    /// signature hash. The remaining topics are consumed by the indexed
    /// parameters in declaration order; the non-indexed parameters decode
    /// from `data`.
    pub fn decode_event_data(&self, topics: &[B256], data: &[u8]) -> Result<DecodedEvent> {
        let mut next_topic = 0;
        if !self.anonymous {
            let expected = self.signature_hash();
            let Some(first) = topics.first() else {
                return Err(Error::new(
                    ErrorCode::EventsInsufficientTopics,
                    &[&topics.len(), &self.name],
                ));
            };
            if *first != expected {
                return Err(Error::new(
                    ErrorCode::EventSignatureMismatch,
                    &[&self.name, &expected, &first],
                ));
            }
            next_topic = 1;
        }

        let mut indexed = Vec::new();
        let mut body_params = Vec::new();
        for input in &self.inputs {
            if !input.indexed {
                body_params.push(input.clone());
                continue;
            }
            let topic = topics.get(next_topic).ok_or_else(|| {
                Error::new(ErrorCode::EventsInsufficientTopics, &[&topics.len(), &self.name])
            })?;
            next_topic += 1;
            let tc = input.type_component()?;
            let value = match &tc {
                TypeComponent::Elementary { ty, .. } if ty.is_static() => {
                    decode_elementary_word(ty, &topic.0, &tc)?
                }
                // dynamic and composite indexed parameters are stored hashed
                _ => ComponentValue::Bytes(topic.0.to_vec()),
            };
            indexed.push(value);
        }

        let body = TypeComponent::tuple_of(&body_params)?.decode_abi_data(data)?;
        Ok(DecodedEvent { indexed, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Abi;
    use num_bigint::BigInt;
    use sigil_primitives::Address;

    fn transfer_event() -> Entry {
        let abi: Abi = serde_json::from_value(serde_json::json!([{
            "type": "event",
            "name": "Transfer",
            "inputs": [
                { "name": "from", "type": "address", "indexed": true },
                { "name": "to", "type": "address", "indexed": true },
                { "name": "value", "type": "uint256" }
            ]
        }]))
        .unwrap();
        abi.event("Transfer").unwrap().clone()
    }

    fn address_topic(addr: &Address) -> B256 {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(addr.as_slice());
        B256(word)
    }

    #[test]
    fn matches_erc20_transfer() {
        let event = transfer_event();
        let from: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();
        let to: Address = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359".parse().unwrap();
        let mut data = [0u8; 32];
        data[31] = 100;

        let topics = [event.signature_hash(), address_topic(&from), address_topic(&to)];
        let decoded = event.decode_event_data(&topics, &data).unwrap();
        assert_eq!(
            decoded.indexed,
            [ComponentValue::Address(from), ComponentValue::Address(to)]
        );
        assert_eq!(
            decoded.body,
            ComponentValue::Tuple(vec![ComponentValue::Integer(BigInt::from(100u8))])
        );
    }

    #[test]
    fn rejects_wrong_signature_topic() {
        let event = transfer_event();
        let topics = [B256::ZERO, B256::ZERO, B256::ZERO];
        assert_eq!(
            event.decode_event_data(&topics, &[]).unwrap_err().code(),
            ErrorCode::EventSignatureMismatch
        );
    }

    #[test]
    fn rejects_missing_topics() {
        let event = transfer_event();
        assert_eq!(
            event.decode_event_data(&[], &[]).unwrap_err().code(),
            ErrorCode::EventsInsufficientTopics
        );
        let topics = [event.signature_hash(), B256::ZERO];
        assert_eq!(
            event.decode_event_data(&topics, &[0u8; 32]).unwrap_err().code(),
            ErrorCode::EventsInsufficientTopics
        );
    }

    #[test]
    fn indexed_string_surfaces_as_hash() {
        let abi: Abi = serde_json::from_value(serde_json::json!([{
            "type": "event",
            "name": "Named",
            "inputs": [
                { "name": "name", "type": "string", "indexed": true }
            ]
        }]))
        .unwrap();
        let event = abi.event("Named").unwrap();
        let name_hash = sigil_primitives::keccak256("alice");
        let topics = [event.signature_hash(), name_hash];
        let decoded = event.decode_event_data(&topics, &[]).unwrap();
        assert_eq!(decoded.indexed, [ComponentValue::Bytes(name_hash.to_vec())]);
    }

    #[test]
    fn anonymous_event_skips_topic_zero() {
        let abi: Abi = serde_json::from_value(serde_json::json!([{
            "type": "event",
            "name": "Ping",
            "anonymous": true,
            "inputs": [
                { "name": "id", "type": "uint8", "indexed": true }
            ]
        }]))
        .unwrap();
        let event = abi.event("Ping").unwrap();
        let mut word = [0u8; 32];
        word[31] = 9;
        let decoded = event.decode_event_data(&[B256(word)], &[]).unwrap();
        assert_eq!(decoded.indexed, [ComponentValue::Integer(BigInt::from(9u8))]);
    }
}
