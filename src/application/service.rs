use crate::application::booking_form::{BookingForm, ContactDetails};
use crate::application::ApplicationError;
use crate::domain::event::{BookingPlaced, DomainEvent};
use crate::domain::model::{BookingRecord, BookingRequest, DateRange, RequesterIdentity, Vehicle, VehicleId};
use crate::domain::port::{BookingContext, Clock, EventPublisher, Logger, VehicleCatalog};
use crate::domain::service::{BookingEngine, BookingPolicy, PriceQuote};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

mod booking_query_service;
mod vehicle_query_service;

pub use booking_query_service::BookingQueryService;
pub use vehicle_query_service::VehicleQueryService;

const COMPONENT: &str = "BookingApplicationService";

/// 予約確定後の遷移先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// ログイン済みの利用者はダッシュボードへ
    Dashboard,
    /// ゲストは車両一覧へ
    VehicleCatalog,
}

/// 予約確定の結果
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    /// ストアに保存された予約記録
    pub record: BookingRecord,
    /// 次に表示する画面
    pub follow_up: FollowUp,
    /// 利用者への通知メッセージ
    pub notices: Vec<String>,
}

/// 予約アプリケーションサービス
pub struct BookingApplicationService<C>
where
    C: BookingContext,
{
    context: Arc<C>,
    catalog: Arc<dyn VehicleCatalog>,
    clock: Arc<dyn Clock>,
    logger: Arc<dyn Logger>,
    event_publisher: Arc<dyn EventPublisher>,
    engine: BookingEngine,
}

impl<C> BookingApplicationService<C>
where
    C: BookingContext,
{
    /// 新しいアプリケーションサービスを作成
    ///
    /// # Arguments
    /// * `context` - 利用者・空き状況・予約ストアの依存関係の束
    /// * `catalog` - 車両カタログ
    /// * `clock` - 基準日の提供元
    /// * `logger` - ロガー
    /// * `event_publisher` - イベント発行者
    /// * `policy` - 予約ポリシー
    pub fn new(
        context: Arc<C>,
        catalog: Arc<dyn VehicleCatalog>,
        clock: Arc<dyn Clock>,
        logger: Arc<dyn Logger>,
        event_publisher: Arc<dyn EventPublisher>,
        policy: BookingPolicy,
    ) -> Self {
        Self {
            context,
            catalog,
            clock,
            logger,
            event_publisher,
            engine: BookingEngine::new(policy),
        }
    }

    async fn load_vehicle(&self, vehicle_id: &VehicleId) -> Result<Vehicle, ApplicationError> {
        self.catalog
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::NotFound(format!("車両が見つかりません: {}", vehicle_id))
            })
    }

    /// 予約フォームを開く
    ///
    /// # Arguments
    /// * `vehicle_id` - 車両ID
    ///
    /// # Returns
    /// * `Ok(BookingForm)` - 初期期間の空き状況を確認済みのフォーム
    /// * `Err(ApplicationError)` - 車両が見つからないなど
    pub async fn open_form(&self, vehicle_id: &VehicleId) -> Result<BookingForm, ApplicationError> {
        let vehicle = self.load_vehicle(vehicle_id).await?;
        let user = self.context.current_user();
        Ok(BookingForm::open(
            vehicle,
            self.engine.policy(),
            self.clock.today(),
            user.as_ref(),
            self.context.as_ref(),
        ))
    }

    /// 料金を見積もる
    pub async fn quote(
        &self,
        vehicle_id: &VehicleId,
        period: DateRange,
    ) -> Result<PriceQuote, ApplicationError> {
        let vehicle = self.load_vehicle(vehicle_id).await?;
        Ok(self.engine.quote(&vehicle, &period))
    }

    /// 指定期間の空き状況を確認する
    pub async fn check_availability(
        &self,
        vehicle_id: &VehicleId,
        period: DateRange,
    ) -> Result<bool, ApplicationError> {
        let vehicle = self.load_vehicle(vehicle_id).await?;
        Ok(self
            .context
            .is_available(vehicle.id(), &period.start_iso(), &period.end_iso()))
    }

    /// フォームの内容で予約を送信する
    /// 送信中は再送信を受け付けず、結果にかかわらず送信中フラグを戻す
    /// 送信途中でFutureが破棄された場合もフラグは戻る
    ///
    /// # Returns
    /// * `Ok(BookingConfirmation)` - 予約確定
    /// * `Err(ApplicationError::SubmissionInProgress)` - 送信処理が進行中
    /// * `Err(ApplicationError)` - 却下またはストア失敗
    pub async fn submit_form(
        &self,
        form: &mut BookingForm,
    ) -> Result<BookingConfirmation, ApplicationError> {
        if !form.begin_submission() {
            return Err(ApplicationError::SubmissionInProgress);
        }
        let submission = SubmissionGuard(form);
        let form = &*submission.0;
        let result = self
            .book(form.vehicle().clone(), form.period(), form.contact())
            .await;
        drop(submission);
        result
    }

    /// 予約を登録する
    ///
    /// # Arguments
    /// * `vehicle_id` - 車両ID
    /// * `period` - レンタル期間
    /// * `contact` - 入力された連絡先
    ///
    /// # Returns
    /// * `Ok(BookingConfirmation)` - 予約確定
    /// * `Err(ApplicationError)` - 却下、ストア失敗、車両が見つからないなど
    pub async fn place_booking(
        &self,
        vehicle_id: &VehicleId,
        period: DateRange,
        contact: &ContactDetails,
    ) -> Result<BookingConfirmation, ApplicationError> {
        let vehicle = self.load_vehicle(vehicle_id).await?;
        self.book(vehicle, period, contact).await
    }

    async fn book(
        &self,
        vehicle: Vehicle,
        period: DateRange,
        contact: &ContactDetails,
    ) -> Result<BookingConfirmation, ApplicationError> {
        let correlation_id = Uuid::new_v4();
        let log_context = booking_log_context(vehicle.id(), &period);

        let identity = self.resolve_identity(contact);
        let authenticated = identity.is_authenticated();
        let request = BookingRequest::new(vehicle, period, identity);

        let record = match self.engine.evaluate_booking(
            &request,
            self.clock.today(),
            self.context.as_ref(),
        ) {
            Ok(record) => record,
            Err(rejection) => {
                self.logger.warn(
                    COMPONENT,
                    &format!("Booking rejected: {}", rejection),
                    Some(correlation_id),
                    Some(log_context),
                );
                return Err(rejection.into());
            }
        };

        let stored = match self.context.add_booking(record).await {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                self.logger.error(
                    COMPONENT,
                    "Booking store returned no record",
                    Some(correlation_id),
                    Some(log_context),
                );
                return Err(ApplicationError::StoreFailure(
                    "予約ストアが記録を返しませんでした".to_string(),
                ));
            }
            Err(err) => {
                self.logger.error(
                    COMPONENT,
                    &format!("Booking store failed: {}", err),
                    Some(correlation_id),
                    Some(log_context),
                );
                return Err(ApplicationError::StoreFailure(err.to_string()));
            }
        };

        let mut accepted_context = log_context;
        accepted_context.insert("booking_id".to_string(), stored.id().to_string());
        accepted_context.insert("amount".to_string(), stored.amount().to_string());
        self.logger.info(
            COMPONENT,
            "Booking accepted",
            Some(correlation_id),
            Some(accepted_context),
        );

        // 予約は保存済みのため、イベント発行の失敗は記録のみ行う
        let event = DomainEvent::BookingPlaced(BookingPlaced::from_record(&stored, correlation_id));
        if let Err(err) = self.event_publisher.publish(&event) {
            self.logger.warn(
                COMPONENT,
                &format!("Failed to publish {}: {}", event.event_type(), err),
                Some(correlation_id),
                None,
            );
        }

        Ok(confirmation_for(stored, authenticated))
    }

    /// ログイン状態から予約者の身元を決定する
    /// ログイン済みの場合はプロフィールの電話番号を優先する
    fn resolve_identity(&self, contact: &ContactDetails) -> RequesterIdentity {
        match self.context.current_user() {
            Some(user) => {
                let typed_phone = Some(contact.phone.trim())
                    .filter(|phone| !phone.is_empty())
                    .map(str::to_string);
                RequesterIdentity::Authenticated {
                    user_id: user.id(),
                    phone: user.phone().map(str::to_string).or(typed_phone),
                }
            }
            None => RequesterIdentity::Guest {
                name: contact.guest_name.clone(),
                phone: contact.phone.clone(),
            },
        }
    }
}

/// 破棄されたときにフォームの送信中フラグを戻す
struct SubmissionGuard<'a>(&'a mut BookingForm);

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.0.finish_submission();
    }
}

fn booking_log_context(vehicle_id: &VehicleId, period: &DateRange) -> HashMap<String, String> {
    let mut context = HashMap::new();
    context.insert("vehicle_id".to_string(), vehicle_id.to_string());
    context.insert("start_date".to_string(), period.start_iso());
    context.insert("end_date".to_string(), period.end_iso());
    context
}

fn confirmation_for(record: BookingRecord, authenticated: bool) -> BookingConfirmation {
    let mut notices = vec!["予約が確定しました".to_string()];
    let follow_up = if authenticated {
        FollowUp::Dashboard
    } else {
        notices.push(
            "予約を受け付けました。詳細の確認のため管理者からご連絡いたします".to_string(),
        );
        FollowUp::VehicleCatalog
    };
    BookingConfirmation {
        record,
        follow_up,
        notices,
    }
}
