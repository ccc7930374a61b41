use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    #[default]
    Ja,
    En,
}

impl Lang {
    pub fn display_name(&self) -> &'static str {
        match self {
            Lang::Ja => "日本語",
            Lang::En => "English",
        }
    }

    pub fn all() -> &'static [Lang] {
        &[Lang::Ja, Lang::En]
    }
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ja (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ja,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ja => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ja = lang() == Lang::Ja;
    match key {
        // ── Menus ───────────────────────────────────────────
        "menu.file" => if ja { "ファイル" } else { "File" },
        "menu.open" => if ja { "画像を開く..." } else { "Open image..." },
        "menu.open_title" => if ja { "間取り図を選択" } else { "Select floor plan" },
        "menu.quit" => if ja { "終了" } else { "Quit" },
        "menu.view" => if ja { "表示" } else { "View" },
        "menu.controls" => if ja { "操作パネル" } else { "Controls" },
        "menu.settings" => if ja { "設定..." } else { "Settings..." },
        "menu.language" => if ja { "言語" } else { "Language" },
        "menu.reset" => if ja { "リセット" } else { "Reset" },

        // ── Canvas ──────────────────────────────────────────
        "canvas.placeholder" => if ja { "間取り図の画像をドロップするか、ファイルを開いてください" } else { "Drop a floor plan image here or open a file" },
        "canvas.loading" => if ja { "画像を処理中..." } else { "Processing image..." },
        "label.selected_area" => if ja { "選択範囲の面積" } else { "Selected area" },

        // ── Control panel ───────────────────────────────────
        "panel.area" => if ja { "部屋の面積" } else { "Room area" },
        "panel.unit" => if ja { "単位" } else { "Unit" },
        "panel.calculate" => if ja { "スケール計算" } else { "Calculate scale" },
        "panel.finish" => if ja { "多角形を閉じる" } else { "Close polygon" },
        "panel.clear" => if ja { "選択をクリア" } else { "Clear selection" },
        "panel.scale" => if ja { "スケール" } else { "Scale" },
        "panel.no_scale" => if ja { "未計算" } else { "Not calculated" },
        "panel.pixel_area" => if ja { "選択範囲" } else { "Selection" },
        "panel.points" => if ja { "頂点" } else { "Points" },
        "panel.grid" => if ja { "グリッド" } else { "Grid" },
        "panel.show_grid" => if ja { "グリッドを表示" } else { "Show grid" },
        "panel.hide_grid" => if ja { "グリッド表示を隠す" } else { "Hide grid" },
        "panel.grid_offset" => if ja { "オフセット" } else { "Offset" },

        "unit.square_meters" => if ja { "平方メートル (m²)" } else { "Square meters (m²)" },
        "unit.tatami" => if ja { "畳" } else { "Tatami mats" },

        // ── Status bar hints ────────────────────────────────
        "hint.no_image" => if ja { "画像ファイルを選択してください" } else { "Select an image file" },
        "hint.empty" => if ja { "クリックして部屋の角を指定" } else { "Click to place the room's first corner" },
        "hint.drawing" => if ja { "最初の点をクリックして閉じる" } else { "Click the first point to close the outline" },
        "hint.closed" => if ja { "面積を入力してスケールを計算" } else { "Enter the area and calculate the scale" },
        "hint.scaled" => if ja { "グリッドをドラッグして位置合わせ  Esc: キャンセル" } else { "Drag the grid to align it  Esc: cancel" },

        // ── Dialogs ─────────────────────────────────────────
        "dialog.confirm_reset" => if ja { "現在の作業内容をリセットしますか？" } else { "Reset the current work?" },
        "dialog.ok" => if ja { "OK" } else { "OK" },
        "dialog.cancel" => if ja { "キャンセル" } else { "Cancel" },

        // ── Notifications ───────────────────────────────────
        "notify.image_loaded" => if ja { "画像をロードしました" } else { "Image loaded" },
        "notify.not_an_image" => if ja { "画像ファイルを選択してください" } else { "Please select an image file" },
        "notify.too_large" => if ja { "ファイルサイズが大きすぎます (最大: 10MB)" } else { "File is too large (max: 10MB)" },
        "notify.read_failed" => if ja { "ファイルの読み込みに失敗しました" } else { "Failed to read the file" },
        "notify.decode_failed" => if ja { "画像の読み込みに失敗しました" } else { "Failed to load the image" },
        "notify.process_failed" => if ja { "画像の処理中にエラーが発生しました" } else { "An error occurred while processing the image" },
        "notify.polygon_closed" => if ja { "多角形選択が完了しました" } else { "Polygon selection completed" },
        "notify.polygon_required" => if ja { "多角形による範囲選択を先に行い、閉じてください" } else { "Select the room with a polygon and close it first" },
        "notify.degenerate_polygon" => if ja { "選択範囲の面積が0です" } else { "The selected outline has zero area" },
        "notify.invalid_area" => if ja { "有効な面積を入力してください" } else { "Please enter a valid area" },
        "notify.scale_computed" => if ja { "スケール計算が完了しました" } else { "Scale calculation completed" },
        "notify.scale_invalidated" => if ja { "頂点が移動したためスケールを解除しました" } else { "Scale cleared because a vertex moved" },
        "notify.selection_cleared" => if ja { "選択をクリアしました。新しい選択を始めてください。" } else { "Selection cleared. Start a new selection." },
        "notify.tool_reset" => if ja { "ツールをリセットしました" } else { "Tool reset" },
        "notify.grid_shown" => if ja { "グリッドを表示しました" } else { "Grid shown" },
        "notify.grid_hidden" => if ja { "グリッドを非表示にしました" } else { "Grid hidden" },
        "notify.drag_cancelled" => if ja { "グリッド移動をキャンセルしました" } else { "Grid move cancelled" },
        "notify.settings_saved" => if ja { "設定を保存しました" } else { "Settings saved" },

        // ── Settings window ─────────────────────────────────
        "settings.title" => if ja { "設定" } else { "Settings" },
        "settings.ui" => if ja { "インターフェース" } else { "Interface" },
        "settings.font_size" => if ja { "文字サイズ" } else { "Font size" },
        "settings.toast_seconds" => if ja { "通知の表示時間 (秒)" } else { "Notification time (s)" },
        "settings.default_unit" => if ja { "既定の単位" } else { "Default unit" },
        "settings.grid" => if ja { "グリッド" } else { "Grid" },
        "settings.grid_color" => if ja { "線の色" } else { "Line color" },
        "settings.grid_opacity" => if ja { "不透明度" } else { "Opacity" },
        "settings.grid_width" => if ja { "線の太さ" } else { "Line width" },
        "settings.polygon" => if ja { "多角形" } else { "Polygon" },
        "settings.polygon_color" => if ja { "線の色" } else { "Line color" },
        "settings.fill_opacity" => if ja { "塗りの不透明度" } else { "Fill opacity" },
        "settings.apply" => if ja { "適用" } else { "Apply" },
        "settings.reset" => if ja { "既定に戻す" } else { "Reset" },
        "settings.close" => if ja { "閉じる" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}
