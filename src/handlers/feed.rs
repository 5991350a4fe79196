use actix_web::http::header;
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use futures::stream;
use serde::Serialize;

use crate::application::feed::BookingFeedSubscriber;
use crate::errors::AppError;
use crate::handlers::bookings::BookingResponse;
use crate::infrastructure::feed_hub::PgBookingFeed;

#[derive(Debug, Serialize)]
struct FeedSnapshot {
    today: NaiveDate,
    bookings: Vec<BookingResponse>,
}

fn sse_frame(subscriber: &BookingFeedSubscriber) -> String {
    let snapshot = FeedSnapshot {
        today: subscriber.today(),
        bookings: subscriber
            .bookings()
            .iter()
            .cloned()
            .map(BookingResponse::from)
            .collect(),
    };
    match serde_json::to_string(&snapshot) {
        Ok(payload) => format!("data: {payload}\n\n"),
        Err(e) => {
            log::error!("failed to serialize feed snapshot: {e}");
            // SSE comment frame; keeps the stream alive without emitting data.
            ": snapshot serialization failed\n\n".to_string()
        }
    }
}

/// GET /bookings/feed
///
/// Live feed of upcoming bookings as Server-Sent Events. Each event is a
/// full snapshot of bookings with `fecha_inicio >= today`, ascending,
/// where "today" is fixed at connect time. The subscription is torn down
/// when the client disconnects.
pub async fn booking_feed(feed: web::Data<PgBookingFeed>) -> Result<HttpResponse, AppError> {
    let feed = feed.get_ref().clone();
    let subscriber = web::block(move || BookingFeedSubscriber::mount(&feed))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let frames = stream::unfold(subscriber, |mut subscriber| async move {
        subscriber.next_snapshot().await?;
        let frame = sse_frame(&subscriber);
        Some((
            Ok::<_, actix_web::Error>(web::Bytes::from(frame)),
            subscriber,
        ))
    });

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(frames))
}
