use crate::storage::models::{
    EventRecord, FunnelRecord, ProductRecord, ProfessionRecord, SessionRecord, UserRecord,
};
use migration::entities::{event, funnel, product, profession, session, user};

/// 将 Sea-ORM Model 转换为 UserRecord
pub fn model_to_user(model: user::Model) -> UserRecord {
    UserRecord {
        user_id: model.user_id,
        fullname: model.fullname,
        email: model.email,
        phone: model.phone,
        is_client: model.is_client,
    }
}

pub fn model_to_session(model: session::Model) -> SessionRecord {
    SessionRecord {
        session_id: model.session_id,
        utm_source: model.utm_source,
        utm_medium: model.utm_medium,
        utm_campaign: model.utm_campaign,
        utm_content: model.utm_content,
        utm_term: model.utm_term,
        country: model.country,
        state: model.state,
        city: model.city,
    }
}

pub fn model_to_profession(model: profession::Model) -> ProfessionRecord {
    ProfessionRecord {
        profession_id: model.profession_id,
        profession_name: model.profession_name,
        meta_pixel: model.meta_pixel,
        meta_token: model.meta_token,
        created_at: model.created_at,
    }
}

pub fn model_to_product(model: product::Model) -> ProductRecord {
    ProductRecord {
        product_id: model.product_id,
        product_name: model.product_name,
        profession_id: model.profession_id,
    }
}

pub fn model_to_funnel(model: funnel::Model) -> FunnelRecord {
    FunnelRecord {
        funnel_id: model.funnel_id,
        funnel_name: model.funnel_name,
        funnel_tag: model.funnel_tag,
        global: model.global,
        profession_id: model.profession_id,
        created_at: model.created_at,
    }
}

/// 解析 event_properties：合法 JSON 返回解析结果，否则原样作为字符串返回
pub fn parse_event_properties(raw: Option<String>) -> Option<serde_json::Value> {
    raw.map(|text| match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => serde_json::Value::String(text),
    })
}

/// 将 event Model 转换为 EventRecord（关联实体由调用方填充）
pub fn model_to_event(model: event::Model) -> EventRecord {
    EventRecord {
        event_id: model.event_id,
        event_name: model.event_name,
        pageview_id: model.pageview_id,
        session_id: model.session_id,
        event_time: model.event_time,
        user_id: model.user_id,
        profession_id: model.profession_id,
        product_id: model.product_id,
        funnel_id: model.funnel_id,
        event_source: model.event_source,
        event_type: model.event_type,
        event_properties: parse_event_properties(model.event_properties),
        user: None,
        session: None,
        profession: None,
        product: None,
        funnel: None,
    }
}
